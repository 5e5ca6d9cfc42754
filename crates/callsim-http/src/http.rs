//! HTTP backend abstraction.
//!
//! A small trait over "send a request, parse the body as JSON" so the client
//! can be tested against canned responses. The production implementation
//! uses reqwest and never retries: a failed request is reported once.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::HttpResult;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON bodies.
///
/// This is an implementation detail - external code should use the
/// `CallerBackendPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `GET` a URL and parse the body as JSON.
    async fn get_json(&self, url: &Url) -> HttpResult<Value>;

    /// `POST` to a URL with an optional JSON body and parse the response body.
    async fn post_json(&self, url: &Url, body: Option<&Value>) -> HttpResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// The body is parsed whatever the HTTP status: the backend reports logical
/// failures (`{"status": "error", ...}`) in the body.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn read_json(url: &Url, response: reqwest::Response) -> HttpResult<Value> {
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, %status, bytes = text.len(), "Backend responded");
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json(&self, url: &Url) -> HttpResult<Value> {
        let response = self.client.get(url.as_str()).send().await?;
        Self::read_json(url, response).await
    }

    async fn post_json(&self, url: &Url, body: Option<&Value>) -> HttpResult<Value> {
        let mut request = self.client.post(url.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::read_json(url, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
