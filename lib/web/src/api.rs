use crate::state::{AppState, ConsoleEdits};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use grappa_console::{QueryConsole, SessionConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/console", get(handle_console_get))
        .route("/console/edit", post(handle_edit_post))
        .route("/console/execute", post(handle_execute_post))
        .route("/console/clear", post(handle_clear_post))
        .route("/console/reset", post(handle_reset_post))
}

/// The observable state of the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    pub config: SessionConfig,
    pub result: Option<Value>,
    pub status: Option<String>,
    pub permalink: String,
    pub address: String,
    /// The result in the selected output format, as text.
    pub rendered: String,
    pub client_cached: bool,
}

impl From<&QueryConsole> for ConsoleSnapshot {
    fn from(console: &QueryConsole) -> Self {
        Self {
            config: console.config().clone(),
            result: console.result().cloned(),
            status: console.status().map(str::to_owned),
            permalink: console.permalink().to_string(),
            address: console.address().to_string(),
            rendered: console.render().to_string(),
            client_cached: console.has_client(),
        }
    }
}

async fn snapshot(state: &AppState) -> Json<ConsoleSnapshot> {
    Json(ConsoleSnapshot::from(&*state.console.lock().await))
}

async fn handle_console_get(State(state): State<AppState>) -> Json<ConsoleSnapshot> {
    snapshot(&state).await
}

async fn handle_edit_post(
    State(state): State<AppState>,
    Json(edits): Json<ConsoleEdits>,
) -> Json<ConsoleSnapshot> {
    edits.apply(&mut *state.console.lock().await);
    snapshot(&state).await
}

async fn handle_execute_post(
    State(state): State<AppState>,
    Json(edits): Json<ConsoleEdits>,
) -> Json<ConsoleSnapshot> {
    edits.apply(&mut *state.console.lock().await);
    state.execute().await;
    snapshot(&state).await
}

async fn handle_clear_post(State(state): State<AppState>) -> Json<ConsoleSnapshot> {
    state.console.lock().await.clear_result();
    snapshot(&state).await
}

async fn handle_reset_post(State(state): State<AppState>) -> Json<ConsoleSnapshot> {
    state.console.lock().await.reset_to_defaults();
    snapshot(&state).await
}
