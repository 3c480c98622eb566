use grappa_console::ClientFactory;
use std::sync::Arc;
use url::Url;

/// Holds the configuration for a Grappa web server.
pub struct ServerConfig {
    /// Creates the translation clients of the hosted console.
    pub factory: Arc<dyn ClientFactory>,
    /// The IP address or DNS name that the socket binds to.
    pub bind: String,
    /// Whether CORS is enabled.
    pub cors: bool,
    /// The externally visible URL of the console page, used for permalinks.
    ///
    /// Defaults to `http://<bind>/app`.
    pub public_url: Option<Url>,
}
