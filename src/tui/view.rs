use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::model::{Focus, Screen, TuiModel};
use crate::domain::Entry;
use crate::holder::Holder;

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Rows of the list pane for a terminal of the given height
    pub fn list_height(terminal_height: u16) -> usize {
        // title + input box + list borders + status bar
        terminal_height.saturating_sub(1 + 3 + 2 + 2) as usize
    }

    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Search box
                Constraint::Min(0),    // List pane
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        Self::render_title_bar(model, frame, chunks[0]);

        match model.screen {
            Screen::Dashboard => {
                Self::render_search_box(
                    frame,
                    chunks[1],
                    "Repository",
                    model.dashboard.input(),
                    model.focus == Focus::Input,
                );
                Self::render_holder(
                    frame,
                    chunks[2],
                    "Active repositories",
                    model.dashboard.holder(),
                    model.focus == Focus::List,
                );
                Self::render_suggestions(model, frame, chunks[1], chunks[2]);
            }
            Screen::Commits => {
                if let Some(commits) = &model.commits {
                    Self::render_search_box(
                        frame,
                        chunks[1],
                        "Search commits",
                        commits.input(),
                        model.focus == Focus::Input,
                    );
                    Self::render_holder(
                        frame,
                        chunks[2],
                        "Commits",
                        commits.holder(),
                        model.focus == Focus::List,
                    );
                }
            }
        }

        Self::render_status_bar(model, frame, chunks[3]);

        if model.show_help {
            Self::render_help(frame, size);
        } else if !model.errors.is_empty() {
            Self::render_error_overlay(model, frame, size);
        }
    }

    fn render_title_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let title = match (&model.screen, &model.commits) {
            (Screen::Commits, Some(commits)) => format!("commitdash - {}", commits.repository()),
            _ => "commitdash - Dashboard".to_string(),
        };

        let title_paragraph = Paragraph::new(title)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .alignment(Alignment::Center);

        frame.render_widget(title_paragraph, area);
    }

    fn render_search_box(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };

        let input = Paragraph::new(format!("{}{}", text, cursor)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );
        frame.render_widget(input, area);
    }

    fn entry_line(entry: &Entry) -> Line<'_> {
        match entry {
            Entry::Repository(name) => Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Green)),
                Span::styled(name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Entry::Text(text) => Line::from(Span::raw(text.as_str())),
            Entry::CommitLink(commit) => Line::from(vec![
                Span::styled(
                    commit.message.as_str(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(format!("  {}", commit.url), Style::default().fg(Color::DarkGray)),
            ]),
            Entry::Placeholder(text) => Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(Color::Yellow),
            )),
        }
    }

    fn render_holder(frame: &mut Frame, area: Rect, title: &str, holder: &Holder, focused: bool) {
        let height = area.height.saturating_sub(2) as usize;

        let items: Vec<ListItem> = holder
            .visible(height)
            .map(|(index, entry)| {
                let style = if focused && index == holder.cursor {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Self::entry_line(entry)).style(style)
            })
            .collect();

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("{} ({})", title, holder.len())),
        );
        frame.render_widget(list, area);
    }

    /// Autocomplete dropdown, drawn over the top of the list pane
    fn render_suggestions(model: &TuiModel, frame: &mut Frame, input_area: Rect, list_area: Rect) {
        let suggestions = model.dashboard.suggestions();
        if suggestions.is_empty() || model.focus != Focus::Input {
            return;
        }

        let height = u16::try_from(suggestions.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(list_area.height);
        let area = Rect {
            x: input_area.x + 1,
            y: list_area.y,
            width: input_area.width.saturating_sub(2).min(40),
            height,
        };

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if model.dashboard.highlighted() == Some(i) {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(name.as_str()).style(style)
            })
            .collect();

        frame.render_widget(Clear, area);
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_status_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status = model.messages.last().cloned().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Self::get_key_hints(model)).style(Style::default().fg(Color::Gray)),
            chunks[1],
        );
    }

    /// Get key hints for the focused widget
    fn get_key_hints(model: &TuiModel) -> &'static str {
        match (model.screen, model.focus) {
            (Screen::Dashboard, Focus::Input) => {
                "Type to search | ↑↓ Choose | Enter Activate | Tab List | F5 Refresh | Esc Quit"
            }
            (Screen::Dashboard, Focus::List) => {
                "j/k Move | Enter Commits | r Refresh | Tab Search | ? Help | q Quit"
            }
            (Screen::Commits, Focus::Input) => "Type a term | Enter Search | Tab Results | Esc Back",
            (Screen::Commits, Focus::List) => "j/k Move | Enter/o Open | b Back | Tab Search | q Quit",
        }
    }

    fn render_help(frame: &mut Frame, area: Rect) {
        let heading = Style::default().add_modifier(Modifier::UNDERLINED);
        let help_text = vec![
            Line::from(Span::styled("commitdash Help", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled("Dashboard:", heading)),
            Line::from("  Type 2+ characters to get repository suggestions"),
            Line::from("  ↑/↓ then Enter - Activate the highlighted repository"),
            Line::from("  Enter on a listed repository - Search its commits"),
            Line::from(""),
            Line::from(Span::styled("Commit search:", heading)),
            Line::from("  Enter - Search for the typed term"),
            Line::from("  Enter/o on a result - Open the commit in a browser"),
            Line::from("  b - Back to the dashboard"),
            Line::from(""),
            Line::from(Span::styled("Global:", heading)),
            Line::from("  Tab - Switch between search box and list"),
            Line::from("  F5 / Ctrl+R - Refresh the backend repository list"),
            Line::from("  Esc - Back / Quit, Ctrl+C - Quit"),
            Line::from(""),
            Line::from("Press any key to close help..."),
        ];

        let popup = Self::centered_rect(70, 80, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_text)
                .block(Block::default().borders(Borders::ALL).title("Help"))
                .wrap(Wrap { trim: true }),
            popup,
        );
    }

    fn render_error_overlay(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(60, 20, area);

        frame.render_widget(Clear, popup_area);

        let error_text: Vec<Line> = model
            .errors
            .iter()
            .map(|error| Line::from(error.as_str()))
            .collect();

        let error_popup = Paragraph::new(error_text)
            .block(Block::default().borders(Borders::ALL).title("Errors (Esc to dismiss)"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });

        frame.render_widget(error_popup, popup_area);
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
