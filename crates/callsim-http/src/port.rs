//! `CallerBackendPort` implementation for `CallerHttpClient`.
//!
//! Converts between raw JSON bodies and the core DTOs, and maps internal
//! `HttpError`s to `BackendError`.

use async_trait::async_trait;
use callsim_core::ports::{
    BackendError, BackendResult, CallerBackendPort, Endpoint, LaunchRequest, LaunchResponse,
    LogsResponse, OptionsResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::CallerHttpClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpError` to core `BackendError`.
fn map_error(endpoint: Endpoint, err: HttpError) -> BackendError {
    match err {
        HttpError::Network(e) if e.is_decode() => BackendError::decode(endpoint, e.to_string()),
        HttpError::Network(e) => BackendError::transport(endpoint, e.to_string()),
        HttpError::JsonParse(e) => BackendError::decode(endpoint, e.to_string()),
        HttpError::InvalidUrl(e) => BackendError::Configuration(e.to_string()),
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> BackendResult<T> {
    serde_json::from_value(value).map_err(|e| BackendError::decode(endpoint, e.to_string()))
}

// ============================================================================
// Port Implementation
// ============================================================================

impl<B: HttpBackend> CallerHttpClient<B> {
    async fn call(&self, endpoint: Endpoint, body: Option<&Value>) -> BackendResult<Value> {
        self.request(endpoint, body)
            .await
            .map_err(|e| map_error(endpoint, e))
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> CallerBackendPort for CallerHttpClient<B> {
    async fn fetch_options(&self) -> BackendResult<OptionsResponse> {
        let value = self.call(Endpoint::Options, None).await?;
        decode(Endpoint::Options, value)
    }

    async fn launch(&self, request: &LaunchRequest) -> BackendResult<LaunchResponse> {
        let body = serde_json::to_value(request)
            .map_err(|e| BackendError::decode(Endpoint::Launch, e.to_string()))?;
        let value = self.call(Endpoint::Launch, Some(&body)).await?;
        decode(Endpoint::Launch, value)
    }

    async fn fetch_logs(&self) -> BackendResult<LogsResponse> {
        let value = self.call(Endpoint::Logs, None).await?;
        decode(Endpoint::Logs, value)
    }

    async fn run(&self) -> BackendResult<Value> {
        self.call(Endpoint::Run, None).await
    }

    async fn stop(&self) -> BackendResult<Value> {
        self.call(Endpoint::Stop, None).await
    }
}
