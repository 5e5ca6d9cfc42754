//! Client for the backend process-management service.

use callsim_core::{BackendError, Endpoint};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::{endpoint_url, parse_base_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Client using the reqwest HTTP backend.
pub type DefaultCallerClient = CallerHttpClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the five backend endpoints.
///
/// Generic over an HTTP backend so tests can inject canned responses. Use
/// `DefaultCallerClient` in production code and talk to it through
/// `CallerBackendPort`.
pub struct CallerHttpClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultCallerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &HttpClientConfig) -> Result<Self, BackendError> {
        let base_url = parse_base_url(&config.base_url).map_err(|e| {
            BackendError::Configuration(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        let backend = ReqwestBackend::new(config)
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> CallerHttpClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(base_url: Url, backend: B) -> Self {
        Self { backend, base_url }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) async fn request(&self, endpoint: Endpoint, body: Option<&Value>) -> HttpResult<Value> {
        let url = endpoint_url(&self.base_url, endpoint)?;
        debug!(%endpoint, %url, "Backend request");
        if endpoint.is_post() {
            self.backend.post_json(&url, body).await
        } else {
            self.backend.get_json(&url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    #[test]
    fn test_default_client_creation() {
        let client = DefaultCallerClient::new(&HttpClientConfig::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_bad_base_url_is_configuration_error() {
        let result = DefaultCallerClient::new(&HttpClientConfig::new().with_base_url("::"));
        assert!(matches!(result, Err(BackendError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_request_uses_endpoint_method() {
        let backend = FakeBackend::new()
            .with_json("/stop", &json!({"status": "terminated"}))
            .with_json("/options", &json!({}));
        let client = CallerHttpClient::with_backend(Url::parse("http://h/").unwrap(), backend);

        client.request(Endpoint::Stop, None).await.unwrap();
        client.request(Endpoint::Options, None).await.unwrap();

        let requests = client.backend.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://h/stop");
        assert_eq!(requests[1].method, "GET");
    }
}
