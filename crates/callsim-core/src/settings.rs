//! Controller settings and validation.
//!
//! Pure configuration with no infrastructure dependencies. Adapters build a
//! `ControllerSettings` from their own sources (CLI flags, env) and validate
//! it before constructing the controller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Gender;

/// Log substring the backend prints once the caller finished loading.
pub const DEFAULT_READINESS_MARKER: &str = "Models are loaded and ready.";

/// Interval between readiness polls while connecting.
pub const DEFAULT_READINESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Interval of the call elapsed-time counter.
pub const DEFAULT_CALL_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Frame interval of the "Please wait" animation.
pub const DEFAULT_ELLIPSIS_INTERVAL: Duration = Duration::from_millis(400);

/// Interval of the log panel refresh.
pub const DEFAULT_LOG_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Interval of the phone clock.
pub const DEFAULT_CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Timing and protocol settings for the caller controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    pub readiness_marker: String,
    pub readiness_poll_interval: Duration,
    pub call_tick_interval: Duration,
    pub ellipsis_interval: Duration,
    pub log_refresh_interval: Duration,
    pub clock_interval: Duration,
    pub default_gender: Gender,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            readiness_marker: DEFAULT_READINESS_MARKER.to_string(),
            readiness_poll_interval: DEFAULT_READINESS_POLL_INTERVAL,
            call_tick_interval: DEFAULT_CALL_TICK_INTERVAL,
            ellipsis_interval: DEFAULT_ELLIPSIS_INTERVAL,
            log_refresh_interval: DEFAULT_LOG_REFRESH_INTERVAL,
            clock_interval: DEFAULT_CLOCK_INTERVAL,
            default_gender: Gender::default(),
        }
    }
}

impl ControllerSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_readiness_marker(mut self, marker: impl Into<String>) -> Self {
        self.readiness_marker = marker.into();
        self
    }

    #[must_use]
    pub const fn with_readiness_poll_interval(mut self, interval: Duration) -> Self {
        self.readiness_poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_call_tick_interval(mut self, interval: Duration) -> Self {
        self.call_tick_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_ellipsis_interval(mut self, interval: Duration) -> Self {
        self.ellipsis_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_log_refresh_interval(mut self, interval: Duration) -> Self {
        self.log_refresh_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_clock_interval(mut self, interval: Duration) -> Self {
        self.clock_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_default_gender(mut self, gender: Gender) -> Self {
        self.default_gender = gender;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Readiness marker cannot be empty")]
    EmptyReadinessMarker,

    #[error("Interval '{0}' must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &ControllerSettings) -> Result<(), SettingsError> {
    if settings.readiness_marker.trim().is_empty() {
        return Err(SettingsError::EmptyReadinessMarker);
    }

    let intervals = [
        ("readiness_poll_interval", settings.readiness_poll_interval),
        ("call_tick_interval", settings.call_tick_interval),
        ("ellipsis_interval", settings.ellipsis_interval),
        ("log_refresh_interval", settings.log_refresh_interval),
        ("clock_interval", settings.clock_interval),
    ];
    if let Some((name, _)) = intervals.iter().find(|(_, d)| d.is_zero()) {
        return Err(SettingsError::ZeroInterval(*name));
    }

    Ok(())
}
