//! Serves the Grappa query console as a web page and as a JSON API.
//!
//! The server hosts a single console, like a browser tab hosts a single page.
//! `GET /app` is a page load: the console is re-initialized from the page
//! parameters and runs the automatic execution if they are complete.

use anyhow::Context;
use axum::response::Redirect;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

mod api;
mod app;
mod config;
mod error;
mod state;

pub use api::ConsoleSnapshot;
pub use config::ServerConfig;
pub use error::GrappaServerError;
pub use state::{AppState, ConsoleEdits};

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let page_url = match config.public_url {
        Some(url) => url,
        None => Url::parse(&format!("http://{}/app", config.bind))
            .with_context(|| format!("Cannot derive a page URL from '{}'", config.bind))?,
    };
    let app = create_router(AppState::new(config.factory, page_url.clone()));
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("Cannot bind to '{}'", config.bind))?;
    tracing::info!(
        "Listening on {}, console at {page_url}",
        listener.local_addr()?
    );
    Ok(axum::serve(listener, app).await?)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/app") }))
        .nest("/app", app::create_app_routes())
        .nest("/api", api::create_api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
