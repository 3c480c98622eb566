mod page;

use crate::error::GrappaServerError;
use crate::state::{AppState, ConsoleEdits};
use axum::extract::{RawQuery, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use grappa_console::OutputFormat;
use serde::Deserialize;

pub fn create_app_routes() -> Router<AppState> {
    Router::new().route("/", get(handle_page_get).post(handle_page_post))
}

/// The fields of the console form.
#[derive(Debug, Deserialize)]
pub struct ConsoleForm {
    endpoint: String,
    query: String,
    context: String,
    format: String,
    action: String,
}

/// A page load: the console is initialized from the page parameters.
async fn handle_page_get(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, GrappaServerError> {
    let mut page_url = state.page_url.clone();
    page_url.set_query(query.as_deref());
    state.load(&page_url).await;

    let console = state.console.lock().await;
    page::render_page(&console).map(Html)
}

/// A form submission: changed fields are applied, then the requested action.
async fn handle_page_post(
    State(state): State<AppState>,
    Form(form): Form<ConsoleForm>,
) -> Result<Html<String>, GrappaServerError> {
    let action = FormAction::parse(&form.action)?;
    {
        let mut console = state.console.lock().await;
        ConsoleEdits {
            endpoint: Some(form.endpoint),
            query: Some(normalize_newlines(form.query)),
            context: Some(normalize_newlines(form.context)),
            format: Some(OutputFormat::from_tag(&form.format)),
        }
        .apply(&mut console);
        match action {
            FormAction::Clear => console.clear_result(),
            FormAction::Reset => console.reset_to_defaults(),
            FormAction::Execute | FormAction::Update => {}
        }
    }
    if action == FormAction::Execute {
        state.execute().await;
    }

    let console = state.console.lock().await;
    page::render_page(&console).map(Html)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    Execute,
    Clear,
    Reset,
    Update,
}

impl FormAction {
    fn parse(action: &str) -> Result<Self, GrappaServerError> {
        match action {
            "execute" => Ok(Self::Execute),
            "clear" => Ok(Self::Clear),
            "reset" => Ok(Self::Reset),
            "update" => Ok(Self::Update),
            _ => Err(GrappaServerError::BadRequest(format!(
                "Unknown console action '{action}'"
            ))),
        }
    }
}

/// Browsers submit textarea content with CRLF line breaks.
fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}
