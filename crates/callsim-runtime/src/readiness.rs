//! Readiness check for a freshly launched caller.
//!
//! The backend has no status endpoint: it prints a fixed marker line to its
//! log once the worker finished loading. A check is one `/logs` fetch and a
//! substring search; the controller repeats it on a fixed interval.

use callsim_core::ports::CallerBackendPort;
use tracing::{debug, warn};

/// Fetch the log text once and report whether it contains `marker`.
///
/// A failed fetch counts as "not ready yet"; the caller keeps polling.
pub async fn check_ready(backend: &dyn CallerBackendPort, marker: &str) -> bool {
    match backend.fetch_logs().await {
        Ok(logs) => {
            let ready = logs.contains_marker(marker);
            debug!(ready, "Readiness poll");
            ready
        }
        Err(e) => {
            warn!(error = %e, "Readiness poll failed");
            false
        }
    }
}
