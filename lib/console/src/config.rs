use crate::defaults::{DEFAULT_CONTEXT, DEFAULT_ENDPOINT, DEFAULT_QUERY};
use crate::format::OutputFormat;
use crate::params::ConsoleParams;
use serde::{Deserialize, Serialize};

/// The user-editable inputs of a console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The SPARQL endpoint the translated query runs against.
    pub endpoint: String,
    /// The GraphQL document.
    pub query: String,
    /// The JSON-LD context, as text.
    pub context: String,
    pub format: OutputFormat,
}

impl SessionConfig {
    /// Seeds a config from page parameters, using the defaults for absent ones.
    pub fn from_params(params: &ConsoleParams) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: params.endpoint.clone().unwrap_or(defaults.endpoint),
            query: params.query.clone().unwrap_or(defaults.query),
            context: params.context.clone().unwrap_or(defaults.context),
            format: params
                .format
                .as_deref()
                .map_or(defaults.format, OutputFormat::from_tag),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            query: DEFAULT_QUERY.to_owned(),
            context: DEFAULT_CONTEXT.to_owned(),
            format: OutputFormat::Tree,
        }
    }
}
