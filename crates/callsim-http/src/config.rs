//! Public configuration for the backend HTTP client.

use std::time::Duration;

/// Base URL of a backend started with its defaults.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Configuration for the backend HTTP client.
///
/// # Example
///
/// ```
/// use callsim_http::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new()
///     .with_base_url("http://10.0.0.5:5000")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL the endpoint paths are joined onto
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Per-request timeout; `None` lets a hung request wait forever
    pub(crate) timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("callsim-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set an optional per-request timeout.
    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.contains("callsim-http"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = HttpClientConfig::new()
            .with_base_url("http://backend:8000")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url(), "http://backend:8000");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let config = config.with_optional_timeout(None);
        assert!(config.timeout.is_none());
    }
}
