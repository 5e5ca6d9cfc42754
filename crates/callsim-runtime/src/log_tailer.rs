//! Log panel refresh.

use callsim_core::ports::{CallerBackendPort, CallerView};
use tracing::debug;

/// Fetch the cumulative log text and replace the log panel with it.
///
/// Failures are skipped silently; the next refresh tries again.
pub(crate) async fn refresh_logs(backend: &dyn CallerBackendPort, view: &dyn CallerView) {
    match backend.fetch_logs().await {
        Ok(logs) => view.set_logs(logs.text()),
        Err(e) => debug!(error = %e, "Log refresh failed"),
    }
}
