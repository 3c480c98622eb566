use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;
use url::Url;

/// A failure reported by the translation collaborator.
///
/// Displays as the underlying error's text.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TranslationError(#[source] Box<dyn Error + Send + Sync>);

impl TranslationError {
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self(error.into())
    }
}

/// A handle that translates GraphQL queries to SPARQL and evaluates them.
///
/// A client is bound to the context and endpoint it was created with.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Executes `query` and returns the `data` of the response.
    async fn query(&self, query: &str) -> Result<Value, TranslationError>;
}

/// Creates [`TranslationClient`]s for a (context, endpoint) pair.
pub trait ClientFactory: Send + Sync {
    fn create(
        &self,
        context: Option<&Value>,
        endpoint: &Url,
    ) -> Result<Arc<dyn TranslationClient>, TranslationError>;
}
