//! URL construction for backend endpoints.

use callsim_core::Endpoint;
use url::Url;

/// Parse a base URL, forcing a trailing slash so endpoint paths are joined
/// beneath it rather than replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

/// Absolute URL of an endpoint under `base`.
pub fn endpoint_url(base: &Url, endpoint: Endpoint) -> Result<Url, url::ParseError> {
    base.join(endpoint.path())
}
