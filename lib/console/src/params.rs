use url::Url;

/// The recognized parameters of a page URL, decoded and trimmed.
///
/// A parameter whose value is blank after trimming counts as absent. When a
/// parameter occurs more than once, the last occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsoleParams {
    pub endpoint: Option<String>,
    pub query: Option<String>,
    pub context: Option<String>,
    pub format: Option<String>,
}

impl ConsoleParams {
    /// Extracts the parameters from a full page URL.
    ///
    /// A URL that cannot be parsed yields the empty parameter set.
    pub fn from_page_url(page_url: &str) -> Self {
        match Url::parse(page_url) {
            Ok(url) => Self::from_url(&url),
            Err(error) => {
                tracing::debug!("Ignoring parameters of unparsable page URL: {error}");
                Self::default()
            }
        }
    }

    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "endpoint" => &mut params.endpoint,
                "query" => &mut params.query,
                "context" => &mut params.context,
                "format" => &mut params.format,
                _ => continue,
            };
            let value = value.trim();
            *slot = (!value.is_empty()).then(|| value.to_owned());
        }
        params
    }

    /// Whether endpoint, query and context were all supplied, which triggers
    /// the automatic execution after initialization.
    pub fn is_complete(&self) -> bool {
        self.endpoint.is_some() && self.query.is_some() && self.context.is_some()
    }
}
