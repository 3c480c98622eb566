use crate::client::TranslationError;

/// The reasons an execution attempt can fail.
///
/// None of them is fatal to the console. The `Display` output is the status
/// message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The endpoint is not an absolute URL with a tuple origin.
    #[error("Invalid SPARQL endpoint URL: {0}")]
    InvalidEndpoint(String),
    /// The context is not blank and not valid JSON.
    #[error("Invalid context: {0}")]
    InvalidContext(#[from] serde_json::Error),
    /// Creating the client or running the query failed.
    #[error("Query execution failed: {0}")]
    ExecutionFailed(#[from] TranslationError),
}
