use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures of the server itself.
///
/// Failed query executions are not among them, they end up in the status
/// message of the console.
#[derive(thiserror::Error, Debug)]
pub enum GrappaServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl IntoResponse for GrappaServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GrappaServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            GrappaServerError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, message).into_response()
    }
}
