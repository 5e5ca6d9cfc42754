//! Live call session and its elapsed-time counter.

use serde::{Deserialize, Serialize};

/// Elapsed-time state of the current call.
///
/// Only meaningful while the lifecycle is `Connected`; reset on every
/// teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    pub active: bool,
    pub elapsed_seconds: u64,
}

impl CallSession {
    /// Mark the call active with the counter at zero.
    pub const fn start(&mut self) {
        self.active = true;
        self.elapsed_seconds = 0;
    }

    /// Advance by one second. Ignored when the session is not active.
    pub const fn tick(&mut self) {
        if self.active {
            self.elapsed_seconds += 1;
        }
    }

    pub const fn reset(&mut self) {
        *self = Self {
            active: false,
            elapsed_seconds: 0,
        };
    }

    /// `MM:SS` readout of the elapsed time.
    pub fn readout(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes keep growing past 59.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
