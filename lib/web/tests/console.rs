#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use grappa_console::{
    ClientFactory, OutputFormat, SessionConfig, TranslationClient, TranslationError,
};
use grappa_web::{create_router, AppState, ConsoleSnapshot};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

struct FakeFactory {
    response: Result<Value, String>,
    created: AtomicUsize,
    queried: Arc<AtomicUsize>,
}

struct FakeClient {
    response: Result<Value, String>,
    queried: Arc<AtomicUsize>,
}

impl FakeFactory {
    fn queried(&self) -> usize {
        self.queried.load(Ordering::SeqCst)
    }

    fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationClient for FakeClient {
    async fn query(&self, _query: &str) -> Result<Value, TranslationError> {
        self.queried.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(TranslationError::new)
    }
}

impl ClientFactory for FakeFactory {
    fn create(
        &self,
        _context: Option<&Value>,
        _endpoint: &Url,
    ) -> Result<Arc<dyn TranslationClient>, TranslationError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeClient {
            response: self.response.clone(),
            queried: Arc::clone(&self.queried),
        }))
    }
}

fn server_with(response: Result<Value, &str>) -> (TestServer, Arc<FakeFactory>) {
    let factory = Arc::new(FakeFactory {
        response: response.map_err(str::to_owned),
        created: AtomicUsize::new(0),
        queried: Arc::new(AtomicUsize::new(0)),
    });
    let state = AppState::new(
        Arc::clone(&factory) as Arc<dyn ClientFactory>,
        Url::parse("http://localhost:7878/app").unwrap(),
    );
    let server = TestServer::new(create_router(state)).unwrap();
    (server, factory)
}

fn server() -> (TestServer, Arc<FakeFactory>) {
    server_with(Ok(json!({"label": "Jailhouse Rock"})))
}

fn form<'a>(endpoint: &'a str, format: &'a str, action: &'a str) -> [(&'a str, &'a str); 5] {
    [
        ("endpoint", endpoint),
        ("query", "{\r\n  label\r\n}"),
        ("context", "{}"),
        ("format", format),
        ("action", action),
    ]
}

#[tokio::test]
async fn root_redirects_to_console() {
    let (server, _) = server();
    let response = server.get("/").await;
    response.assert_status(StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.header("location").to_str().unwrap(), "/app");
}

#[tokio::test]
async fn page_load_without_parameters_shows_defaults() {
    let (server, factory) = server();
    let response = server.get("/app").await;
    response.assert_status_ok();

    let page = response.text();
    assert!(page.contains("value=\"http://dbpedia.org/sparql\""));
    assert!(page.contains("<div class=\"placeholder\"></div>"));
    assert!(page.contains("<option value=\"fmt_tree\" selected>"));
    assert!(page.contains("\"schema:name\":\"Grappa\""));
    assert_eq!(factory.queried(), 0);
}

#[tokio::test]
async fn page_load_with_complete_parameters_runs_once() {
    let (server, factory) = server();
    let page = server
        .get("/app")
        .add_query_param("endpoint", "http://example.com/sparql")
        .add_query_param("format", "fmt_json")
        .add_query_param("query", "{ label }")
        .add_query_param("context", "{}")
        .await
        .text();

    assert!(page.contains(r#"<code>{"label":"Jailhouse Rock"}</code>"#));
    assert!(page.contains(
        "history.replaceState(null, \"\", \"http://localhost:7878/app?endpoint=http%3A%2F%2Fexample.com%2Fsparql&format=fmt_json&query=%7B+label+%7D&context=%7B%7D\");"
    ));
    assert_eq!(factory.queried(), 1);

    let snapshot: ConsoleSnapshot = server.get("/api/console").await.json();
    assert_eq!(snapshot.result, Some(json!({"label": "Jailhouse Rock"})));
    assert_eq!(factory.queried(), 1);
}

#[tokio::test]
async fn page_load_with_partial_parameters_does_not_run() {
    let (server, factory) = server();
    let page = server
        .get("/app")
        .add_query_param("query", "{ writer }")
        .await
        .text();

    assert!(page.contains(">{ writer }</textarea>"));
    assert_eq!(factory.queried(), 0);
}

#[tokio::test]
async fn form_execute_renders_formatted_json() {
    let (server, _) = server();
    let page = server
        .post("/app")
        .form(&form(
            "http://example.com/sparql",
            "fmt_json_formatted",
            "execute",
        ))
        .await
        .text();

    assert!(page.contains("<pre>{\n  \"label\": \"Jailhouse Rock\"\n}</pre>"));
    assert!(page.contains("<textarea id=\"query\" name=\"query\" rows=\"10\">{\n  label\n}</textarea>"));
    assert!(page.contains("<script type=\"application/ld+json\">{\"@context\":{},\"label\":\"Jailhouse Rock\"}</script>"));
}

#[tokio::test]
async fn form_execute_renders_tree() {
    let (server, _) = server();
    let page = server
        .post("/app")
        .form(&form("http://example.com/sparql", "fmt_tree", "execute"))
        .await
        .text();

    assert!(page.contains(
        "<span class=\"key\">label</span>: <span class=\"string\">\"Jailhouse Rock\"</span>"
    ));
}

#[tokio::test]
async fn form_with_invalid_endpoint_shows_status() {
    let (server, factory) = server();
    let page = server
        .post("/app")
        .form(&form("not a url", "fmt_tree", "execute"))
        .await
        .text();

    assert!(page.contains(
        "<p class=\"status\">Invalid SPARQL endpoint URL: relative URL without a base</p>"
    ));
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn form_reset_strips_parameters_from_address() {
    let (server, _) = server();
    server
        .post("/app")
        .form(&form("http://example.com/sparql", "fmt_json", "execute"))
        .await
        .assert_status_ok();
    let page = server
        .post("/app")
        .form(&form("http://example.com/sparql", "fmt_json", "reset"))
        .await
        .text();

    assert!(page.contains("history.replaceState(null, \"\", \"http://localhost:7878/app\");"));
    assert!(page.contains("value=\"http://dbpedia.org/sparql\""));
    assert!(page.contains("<div class=\"placeholder\"></div>"));
}

#[tokio::test]
async fn unknown_form_action_is_rejected() {
    let (server, _) = server();
    let response = server
        .post("/app")
        .form(&form("http://example.com/sparql", "fmt_json", "launch"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn format_change_keeps_result() {
    let (server, factory) = server();
    let snapshot: ConsoleSnapshot = server
        .post("/api/console/execute")
        .json(&json!({}))
        .await
        .json();
    assert_eq!(snapshot.result, Some(json!({"label": "Jailhouse Rock"})));
    assert_eq!(snapshot.status, None);
    assert!(snapshot.client_cached);

    let snapshot: ConsoleSnapshot = server
        .post("/api/console/edit")
        .json(&json!({"format": "fmt_json"}))
        .await
        .json();
    assert_eq!(snapshot.config.format, OutputFormat::JsonCompact);
    assert_eq!(snapshot.result, Some(json!({"label": "Jailhouse Rock"})));
    assert_eq!(snapshot.rendered, r#"{"label":"Jailhouse Rock"}"#);
    assert!(snapshot.client_cached);
    assert_eq!(factory.queried(), 1);
}

#[tokio::test]
async fn endpoint_edit_invalidates_client() {
    let (server, factory) = server();
    server
        .post("/api/console/execute")
        .json(&json!({}))
        .await
        .assert_status_ok();

    let snapshot: ConsoleSnapshot = server
        .post("/api/console/edit")
        .json(&json!({"endpoint": "http://example.com/sparql"}))
        .await
        .json();
    assert!(!snapshot.client_cached);
    assert_eq!(snapshot.result, None);

    server
        .post("/api/console/execute")
        .json(&json!({"query": "{ artist { label } }"}))
        .await
        .assert_status_ok();
    assert_eq!(factory.created(), 2);
}

#[tokio::test]
async fn failed_execution_is_a_status_message() {
    let (server, _) = server_with(Err("remote endpoint timed out"));
    let response = server
        .post("/api/console/execute")
        .json(&json!({}))
        .await;
    response.assert_status_ok();

    let snapshot: ConsoleSnapshot = response.json();
    assert_eq!(
        snapshot.status.as_deref(),
        Some("Query execution failed: remote endpoint timed out")
    );
    assert_eq!(snapshot.result, None);
    assert_eq!(snapshot.rendered, "");
}

#[tokio::test]
async fn clear_and_reset() {
    let (server, _) = server();
    server
        .post("/api/console/execute")
        .json(&json!({"context": "{\"@context\": {}}"}))
        .await
        .assert_status_ok();

    let snapshot: ConsoleSnapshot = server.post("/api/console/clear").await.json();
    assert_eq!(snapshot.result, None);
    assert_eq!(snapshot.config.context, "{\"@context\": {}}");
    assert!(snapshot.client_cached);

    let snapshot: ConsoleSnapshot = server.post("/api/console/reset").await.json();
    assert_eq!(snapshot.config, SessionConfig::default());
    assert_eq!(snapshot.address, "http://localhost:7878/app");
    assert!(!snapshot.client_cached);
}
