//! Caller lifecycle state machine.
//!
//! ```text
//! NotLoaded  --Launch-------------> Connecting
//! Connecting --ReadinessObserved--> Ready
//! Connecting --LaunchFailed-------> NotLoaded
//! Ready      --StartCall----------> Connected
//! any        --Stop---------------> NotLoaded
//! ```
//!
//! This enum is the only source of truth for "is the backend process usable
//! right now". Everything the UI needs (`is_connecting`, `is_model_loaded`,
//! `is_call_active`) is derived from it on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the caller process is doing right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallerLifecycleState {
    /// No caller process is usable.
    #[default]
    NotLoaded,
    /// Launch acknowledged (or in flight); waiting for the readiness marker.
    Connecting,
    /// Caller is loaded and idle.
    Ready,
    /// A call is in progress.
    Connected,
}

/// Inputs that drive the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Launch,
    ReadinessObserved,
    LaunchFailed,
    StartCall,
    Stop,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Launch => "launch",
            Self::ReadinessObserved => "readiness observed",
            Self::LaunchFailed => "launch failed",
            Self::StartCall => "start call",
            Self::Stop => "stop",
        };
        f.write_str(name)
    }
}

/// An action that is not valid from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action} while {from}")]
pub struct TransitionError {
    pub from: CallerLifecycleState,
    pub action: LifecycleAction,
}

impl CallerLifecycleState {
    pub const fn is_connecting(self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// The caller process is loaded (idle or in a call).
    pub const fn is_model_loaded(self) -> bool {
        matches!(self, Self::Ready | Self::Connected)
    }

    pub const fn is_call_active(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Anything other than `NotLoaded`; the launch button acts as stop.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::NotLoaded)
    }

    /// Compute the next state, rejecting transitions the machine does not allow.
    ///
    /// `Stop` is valid from every state, `NotLoaded` included, so teardown is
    /// idempotent.
    pub const fn apply(self, action: LifecycleAction) -> Result<Self, TransitionError> {
        use CallerLifecycleState::{Connected, Connecting, NotLoaded, Ready};
        use LifecycleAction::{Launch, LaunchFailed, ReadinessObserved, StartCall, Stop};

        match (self, action) {
            (NotLoaded, Launch) => Ok(Connecting),
            (Connecting, ReadinessObserved) => Ok(Ready),
            (Connecting, LaunchFailed) => Ok(NotLoaded),
            (Ready, StartCall) => Ok(Connected),
            (_, Stop) => Ok(NotLoaded),
            (from, action) => Err(TransitionError { from, action }),
        }
    }
}

impl fmt::Display for CallerLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotLoaded => "not loaded",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Connected => "connected",
        };
        f.write_str(name)
    }
}
