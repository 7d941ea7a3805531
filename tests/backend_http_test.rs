use commitdash::ClientError;
use commitdash::backend::{BackendPort, HttpBackend};
use commitdash::config::{CommitsRoute, ServerConfig};
use commitdash::domain::Commit;
use mockito::{Matcher, Server};
use std::time::Duration;

fn backend(server: &Server, commits_route: CommitsRoute) -> HttpBackend {
    HttpBackend::new(&ServerConfig {
        base_url: server.url(),
        commits_route,
        timeout: Some(Duration::from_secs(5)),
    })
    .expect("backend")
}

#[test]
fn test_active_repositories_in_order() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repositories/active")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name":"zeta","active":true,"id":3},{"name":"alpha","active":true,"id":1}]"#)
        .expect(1)
        .create();

    let names = backend(&server, CommitsRoute::Dashboard)
        .active_repositories()
        .unwrap();
    assert_eq!(names, vec!["zeta", "alpha"]);
    mock.assert();
}

#[test]
fn test_active_repositories_double_encoded() {
    let mut server = Server::new();
    server
        .mock("GET", "/repositories/active")
        .with_status(200)
        .with_body(r#""[\"one\",\"two\"]""#)
        .create();

    let names = backend(&server, CommitsRoute::Dashboard)
        .active_repositories()
        .unwrap();
    assert_eq!(names, vec!["one", "two"]);
}

#[test]
fn test_suggestions_send_term() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repositories")
        .match_query(Matcher::UrlEncoded("term".into(), "re".into()))
        .with_status(200)
        .with_body(r#"["repoA","repoB"]"#)
        .expect(1)
        .create();

    let names = backend(&server, CommitsRoute::Dashboard)
        .repositories(Some("re"))
        .unwrap();
    assert_eq!(names, vec!["repoA", "repoB"]);
    mock.assert();
}

#[test]
fn test_activate_posts_form_name() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/repositories/activate")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded("name".into(), "repoA".into()))
        .with_status(200)
        .with_body("activated")
        .expect(1)
        .create();

    let body = backend(&server, CommitsRoute::Dashboard)
        .activate("repoA")
        .unwrap();
    assert_eq!(body, "activated");
    mock.assert();
}

#[test]
fn test_refresh_ignores_body() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/refresh/repositories")
        .with_status(200)
        .with_body("not json at all")
        .expect(1)
        .create();

    backend(&server, CommitsRoute::Dashboard)
        .refresh_repositories()
        .unwrap();
    mock.assert();
}

#[test]
fn test_commit_search_on_dashboard_route() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/dashboard/myrepo/commits")
        .match_query(Matcher::UrlEncoded("term".into(), "fix bug".into()))
        .with_status(200)
        .with_body(
            r#"[
                {"commit_message": "fix bug in parser", "html_url": "https://github.com/o/myrepo/commit/1"},
                {"message": "fix bug in lexer", "url": "https://github.com/o/myrepo/commit/2"}
            ]"#,
        )
        .expect(1)
        .create();

    let commits = backend(&server, CommitsRoute::Dashboard)
        .commits("myrepo", "fix bug")
        .unwrap();
    assert_eq!(
        commits,
        Some(vec![
            Commit {
                message: "fix bug in parser".to_string(),
                url: "https://github.com/o/myrepo/commit/1".to_string(),
            },
            Commit {
                message: "fix bug in lexer".to_string(),
                url: "https://github.com/o/myrepo/commit/2".to_string(),
            },
        ])
    );
    mock.assert();
}

#[test]
fn test_commit_search_on_plain_route_with_null() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/myrepo/commits")
        .with_status(200)
        .with_body("null")
        .expect(1)
        .create();

    let commits = backend(&server, CommitsRoute::Plain)
        .commits("myrepo", "anything")
        .unwrap();
    assert_eq!(commits, None);
    mock.assert();
}

#[test]
fn test_error_status_is_reported() {
    let mut server = Server::new();
    server
        .mock("GET", "/repositories/active")
        .with_status(403)
        .with_body("unauthorized user")
        .create();

    let err = backend(&server, CommitsRoute::Dashboard)
        .active_repositories()
        .unwrap_err();
    match err {
        ClientError::Status { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn test_malformed_commits_are_a_decode_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/dashboard/myrepo/commits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[{\"commit_message\": ")
        .create();

    let err = backend(&server, CommitsRoute::Dashboard)
        .commits("myrepo", "")
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[test]
fn test_unreachable_server_is_http_error() {
    // Nothing listens on port 9 on a test machine
    let backend = HttpBackend::new(&ServerConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        commits_route: CommitsRoute::Dashboard,
        timeout: Some(Duration::from_secs(2)),
    })
    .unwrap();
    assert!(matches!(
        backend.refresh_repositories(),
        Err(ClientError::Http { .. })
    ));
}
