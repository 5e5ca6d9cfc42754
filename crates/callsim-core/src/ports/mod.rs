//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the controller expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.

pub mod backend;
pub mod view;

use thiserror::Error;

use crate::domain::TransitionError;

pub use backend::{
    BackendResult, CallerBackendPort, Endpoint, LaunchOutcome, LaunchRequest, LaunchResponse,
    LogsResponse, OptionsResponse, VoiceGroupDto,
};
pub use view::{CallerView, NoopView};

/// Errors crossing the backend port.
///
/// Adapters map their transport errors into this type; it carries no
/// transport-specific types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request could not be completed (connection refused, reset, ...).
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// The response body was not the expected JSON.
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: Endpoint, message: String },

    /// The adapter is misconfigured (bad base URL, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    pub fn transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            message: message.into(),
        }
    }

    pub fn decode(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint,
            message: message.into(),
        }
    }
}

/// Local validation failures; no request is sent when one of these occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a scenario")]
    MissingScenario,

    #[error("Please select a voice for the chosen gender")]
    MissingVoice,
}

/// Errors reported by controller operations.
///
/// Every variant is returned only after the controller has already cleaned
/// up: timers canceled, state back to a stable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend answered the launch with a non-success status.
    #[error("Launch rejected: {message}")]
    LaunchRejected { message: String },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// A stop request is still in flight.
    #[error("Caller is stopping, try again shortly")]
    Busy,
}
