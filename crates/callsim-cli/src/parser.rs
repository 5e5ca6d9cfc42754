//! Command-line argument parsing.

use std::time::Duration;

use callsim_core::settings::{DEFAULT_READINESS_MARKER, DEFAULT_READINESS_POLL_INTERVAL};
use callsim_core::{ControllerSettings, Gender};
use callsim_http::{DEFAULT_BASE_URL, HttpClientConfig};
use clap::Parser;

/// Interactive caller console for a callsim backend
#[derive(Parser, Debug)]
#[command(name = "callsim")]
#[command(about = "Load a simulated caller and place calls against a callsim backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "CALLSIM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log line that marks the caller as ready
    #[arg(long, env = "CALLSIM_READINESS_MARKER", default_value = DEFAULT_READINESS_MARKER)]
    pub readiness_marker: String,

    /// Readiness poll interval in milliseconds
    #[arg(
        long,
        env = "CALLSIM_POLL_INTERVAL_MS",
        default_value_t = default_poll_interval_ms()
    )]
    pub poll_interval_ms: u64,

    /// Caller gender selected at startup
    #[arg(long, default_value_t = Gender::Female)]
    pub gender: Gender,

    /// Per-request timeout in seconds (requests wait indefinitely if unset)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

fn default_poll_interval_ms() -> u64 {
    u64::try_from(DEFAULT_READINESS_POLL_INTERVAL.as_millis()).unwrap_or(500)
}

impl Cli {
    /// Controller settings derived from the flags.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings::new()
            .with_readiness_marker(self.readiness_marker.clone())
            .with_readiness_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_default_gender(self.gender)
    }

    /// Backend client configuration derived from the flags.
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_optional_timeout(self.timeout_secs.map(Duration::from_secs))
    }

    /// Tracing directive used when `RUST_LOG` is not set.
    pub const fn default_log_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
