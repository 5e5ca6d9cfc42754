//! Backend process-management port.
//!
//! The controller consumes five endpoints of a remote service that owns the
//! long-running caller process. Implementations hide the transport; the
//! controller only sees these DTOs and [`BackendError`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BackendError;
use crate::domain::{Gender, Scenario};

/// Result type for backend port operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// The backend endpoints the controller talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Options,
    Launch,
    Logs,
    Run,
    Stop,
}

impl Endpoint {
    /// Path relative to the backend base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Launch => "launch",
            Self::Logs => "logs",
            Self::Run => "run",
            Self::Stop => "stop",
        }
    }

    /// Whether the endpoint is called with `POST` (otherwise `GET`).
    pub const fn is_post(self) -> bool {
        matches!(self, Self::Launch | Self::Run | Self::Stop)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// `GET /options` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsResponse {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub voices: Vec<VoiceGroupDto>,
}

/// One `{id, voices}` entry of the options response.
///
/// Kept loose so a single malformed group does not fail the whole fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceGroupDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub voices: Option<serde_json::Value>,
}

/// `POST /launch` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub scenario: String,
    pub gender: Gender,
    pub voice: String,
}

/// How the backend answered a launch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A new caller process was started.
    Launched,
    /// A caller process was already running.
    AlreadyRunning,
    /// Anything else.
    Failed,
}

impl LaunchOutcome {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Launched | Self::AlreadyRunning)
    }
}

/// `POST /launch` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other fields, echoed verbatim to the status panel.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LaunchResponse {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    pub fn outcome(&self) -> LaunchOutcome {
        match self.status.as_str() {
            "launched" => LaunchOutcome::Launched,
            "already running" => LaunchOutcome::AlreadyRunning,
            _ => LaunchOutcome::Failed,
        }
    }

    /// Text to show when the launch failed: the backend message, else the
    /// status, else a generic fallback.
    pub fn failure_message(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| Some(self.status.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or("Launch error")
            .to_string()
    }

    /// Pretty JSON for the status panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.status.clone())
    }
}

/// `GET /logs` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub log: Option<String>,
}

impl LogsResponse {
    pub fn new(log: impl Into<String>) -> Self {
        Self {
            log: Some(log.into()),
        }
    }

    /// Cumulative log text, empty when the backend sent none.
    pub fn text(&self) -> &str {
        self.log.as_deref().unwrap_or_default()
    }

    pub fn contains_marker(&self, marker: &str) -> bool {
        self.text().contains(marker)
    }
}

/// Port for the remote process-management service.
///
/// Calls return as soon as the request resolves; no method retries.
/// `run` and `stop` bodies are returned raw because only transport success
/// matters to the caller.
#[async_trait]
pub trait CallerBackendPort: Send + Sync {
    /// `GET /options`.
    async fn fetch_options(&self) -> BackendResult<OptionsResponse>;

    /// `POST /launch`.
    async fn launch(&self, request: &LaunchRequest) -> BackendResult<LaunchResponse>;

    /// `GET /logs`.
    async fn fetch_logs(&self) -> BackendResult<LogsResponse>;

    /// `POST /run` (starts the call).
    async fn run(&self) -> BackendResult<serde_json::Value>;

    /// `POST /stop`.
    async fn stop(&self) -> BackendResult<serde_json::Value>;
}
