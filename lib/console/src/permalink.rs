use crate::config::SessionConfig;
use url::Url;

/// Returns `page_url` without its query string and fragment.
pub fn bare_page_url(page_url: &Url) -> Url {
    let mut url = page_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Builds the URL that reproduces `config` when loaded.
///
/// Endpoint, query and context are trimmed. If any of them is blank, the bare
/// page URL is returned. Otherwise the query string carries `endpoint`,
/// `format`, `query` and `context`, in that order. Whether the last execution
/// succeeded plays no role.
pub fn compute_permalink(page_url: &Url, config: &SessionConfig) -> Url {
    let mut url = bare_page_url(page_url);
    let endpoint = config.endpoint.trim();
    let query = config.query.trim();
    let context = config.context.trim();
    if endpoint.is_empty() || query.is_empty() || context.is_empty() {
        return url;
    }

    url.query_pairs_mut()
        .append_pair("endpoint", endpoint)
        .append_pair("format", config.format.tag())
        .append_pair("query", query)
        .append_pair("context", context);
    url
}
