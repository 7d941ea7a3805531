//! commitdash - a terminal dashboard for a commit-search backend
//!
//! The dashboard lists active repositories and lets the user activate more
//! of them through an autocomplete box. Each repository has a commit search
//! screen that queries the backend and renders matching commits as links.
//!
//! Controllers never perform I/O themselves: they return [`dispatch::Request`]
//! values which the [`dispatch::Dispatcher`] runs on a worker pool, and they
//! apply the resulting [`dispatch::BackendEvent`]s when the UI loop drains them.

pub mod app;
pub mod backend;
pub mod cli;
pub mod commits;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod holder;
pub mod page;
pub mod tui;

pub use error::{ClientError, Result};
