use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and how the translation service is reached.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// The URL the translation requests are posted to.
    pub url: Url,
    /// The limit for a whole request, including the SPARQL evaluation.
    pub timeout: Duration,
}

impl BridgeConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
