use grappa_console::TranslationError;
use reqwest::StatusCode;

/// An error raised while talking to a translation service.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The JSON-LD context is neither an object nor absent.
    #[error("The JSON-LD context must be an object, found {0}")]
    InvalidContext(&'static str),
    /// The service answered with a non-success status code.
    #[error("Translation service responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The service reported errors for the query.
    #[error("{}", .0.join("; "))]
    Query(Vec<String>),
    /// The response carried neither data nor errors.
    #[error("Translation service response contains no data")]
    MissingData,
}

impl From<BridgeError> for TranslationError {
    fn from(error: BridgeError) -> Self {
        TranslationError::new(error)
    }
}
