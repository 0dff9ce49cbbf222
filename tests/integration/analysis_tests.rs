//! Integration tests for the analysis pipeline
//!
//! These tests use wiremock to serve pages and an on-disk SQLite database to
//! check the full submit/run/store cycle end-to-end.

use page_analyzer::config::{AnalyzerConfig, Config, OutputConfig, UserAgentConfig};
use page_analyzer::output::load_statistics;
use page_analyzer::storage::{AnalysisStore, SqliteStorage};
use page_analyzer::{AnalysisStatus, Orchestrator};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at `db_path`
fn create_test_config(db_path: &str) -> Config {
    Config {
        analyzer: AnalyzerConfig {
            fetch_timeout_secs: 2,
            probe_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            name: "TestAnalyzer".to_string(),
            version: "1.0.0".to_string(),
        },
        output: OutputConfig {
            database_path: db_path.to_string(),
        },
    }
}

/// Opens a fresh database in `dir` and builds an orchestrator over it
fn setup(dir: &TempDir) -> Orchestrator {
    let db_path = dir.path().join("analysis.db");
    let config = create_test_config(db_path.to_str().expect("temp path is UTF-8"));
    let store: Arc<dyn AnalysisStore> =
        Arc::new(SqliteStorage::new(Path::new(&config.output.database_path)).unwrap());
    Orchestrator::new(&config, store).unwrap()
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_analysis_is_persisted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        format!(
            r#"<!DOCTYPE html>
            <html><head><title>Sign in</title></head><body>
            <h1>Welcome</h1>
            <h2>Section</h2><h2>Section</h2>
            <h3>Detail</h3>
            <h6>Footnote</h6>
            <a href="/page1">Page 1</a>
            <a href="page2">Page 2</a>
            <a href="{}/gone">Gone</a>
            <a href="https://unreachable.invalid/">Elsewhere</a>
            <a href="">Nowhere</a>
            <a>No href</a>
            <form action="/session">
                <input type="text" name="login_name">
                <input type="submit" value="Go">
            </form>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    Mock::given(method("HEAD"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (id, handle) = orchestrator.submit(&format!("{}/", base_url)).unwrap();
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.status, AnalysisStatus::Done);
    assert_eq!(result.title, "Sign in");
    assert_eq!(result.html_version, "HTML5");
    assert_eq!(result.headings.levels(), [1, 2, 1, 0, 0, 1]);
    assert_eq!(result.internal_links, 3);
    assert_eq!(result.external_links, 1);
    // /gone returns 410 and the .invalid host never resolves
    assert_eq!(result.broken_links, 2);
    assert!(result.has_login_form);

    let record = orchestrator.store().get_record(id).unwrap().unwrap();
    assert_eq!(record.address, format!("{}/", base_url));
    assert_eq!(record.result, result);
}

#[tokio::test]
async fn test_http_error_page_ends_in_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "<title>Not Found</title><h1>404</h1><a href=\"/\">home</a>",
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (id, handle) = orchestrator
        .submit(&format!("{}/missing", mock_server.uri()))
        .unwrap();
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.status, AnalysisStatus::Error);
    assert_eq!(result.title, "");
    assert_eq!(result.html_version, "");
    assert_eq!(result.headings.total(), 0);
    assert_eq!(result.total_links(), 0);
    assert_eq!(result.broken_links, 0);
    assert!(!result.has_login_form);
    assert!(result.error_message.as_deref().unwrap().contains("404"));

    let stored = orchestrator.store().get_record(id).unwrap().unwrap();
    assert_eq!(stored.result, result);
}

#[tokio::test]
async fn test_fetch_timeout_ends_in_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<h1>Too slow</h1>")
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (_, handle) = orchestrator
        .submit(&format!("{}/", mock_server.uri()))
        .unwrap();
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.status, AnalysisStatus::Error);
    assert_eq!(result.headings.total(), 0);
    assert_eq!(result.total_links(), 0);
    assert!(result
        .error_message
        .as_deref()
        .unwrap()
        .starts_with("Request timeout"));
}

#[tokio::test]
async fn test_probe_failures_do_not_fail_run() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#.to_string(),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (_, handle) = orchestrator
        .submit(&format!("{}/", mock_server.uri()))
        .unwrap();
    let result = handle.await.unwrap().unwrap();

    assert_eq!(result.status, AnalysisStatus::Done);
    assert_eq!(result.internal_links, 3);
    assert_eq!(result.broken_links, 1);
}

#[tokio::test]
async fn test_repeat_analysis_is_stable() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/",
        "<title>Stable</title><h1>a</h1><h4>b</h4><h4>c</h4>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);
    let address = format!("{}/", mock_server.uri());

    let (first_id, first) = orchestrator.submit(&address).unwrap();
    let (second_id, second) = orchestrator.submit(&address).unwrap();
    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert_ne!(first_id, second_id);
    assert_eq!(first.html_version, second.html_version);
    assert_eq!(first.title, second.title);
    assert_eq!(first.headings, second.headings);
}

#[tokio::test]
async fn test_rerun_resets_records() {
    let mock_server = MockServer::start().await;

    mount_html(&mock_server, "/one", "<title>One</title>".to_string()).await;
    mount_html(&mock_server, "/two", "<title>Two</title>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (one, handle) = orchestrator
        .submit(&format!("{}/one", mock_server.uri()))
        .unwrap();
    handle.await.unwrap().unwrap();
    let (two, handle) = orchestrator
        .submit(&format!("{}/two", mock_server.uri()))
        .unwrap();
    handle.await.unwrap().unwrap();

    let handles = orchestrator.rerun(&[one, two, 404]).unwrap();
    assert_eq!(
        handles.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        vec![one, two]
    );

    for (_, handle) in handles {
        assert_eq!(handle.await.unwrap().unwrap().status, AnalysisStatus::Done);
    }

    let titles: Vec<String> = orchestrator
        .store()
        .list_records()
        .unwrap()
        .into_iter()
        .map(|r| r.result.title)
        .collect();
    assert_eq!(titles, vec!["One".to_string(), "Two".to_string()]);
}

#[tokio::test]
async fn test_dropped_handle_still_persists() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", "<title>Detached</title>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let orchestrator = setup(&dir);

    let (id, handle) = orchestrator
        .submit(&format!("{}/", mock_server.uri()))
        .unwrap();
    drop(handle);

    let mut status = AnalysisStatus::Queued;
    for _ in 0..100 {
        status = orchestrator.store().get_record(id).unwrap().unwrap().result.status;
        if status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(status, AnalysisStatus::Done);
    let stats = load_statistics(orchestrator.store().as_ref()).unwrap();
    assert_eq!(stats.total_records, 1);
    assert_eq!(stats.count(AnalysisStatus::Done), 1);
}

#[tokio::test]
async fn test_database_survives_reopen() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", "<title>Kept</title>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let id = {
        let orchestrator = setup(&dir);
        let (id, handle) = orchestrator
            .submit(&format!("{}/", mock_server.uri()))
            .unwrap();
        handle.await.unwrap().unwrap();
        id
    };

    let reopened = SqliteStorage::new(&dir.path().join("analysis.db")).unwrap();
    let record = reopened.get_record(id).unwrap().unwrap();
    assert_eq!(record.result.status, AnalysisStatus::Done);
    assert_eq!(record.result.title, "Kept");

    assert_eq!(reopened.delete_records(&[id]).unwrap(), 1);
    assert!(reopened.list_records().unwrap().is_empty());
}
