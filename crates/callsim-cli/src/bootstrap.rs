//! CLI bootstrap: the composition root.
//!
//! The only place where the HTTP client, the terminal view and the
//! controller are wired together.

use std::sync::Arc;

use anyhow::{Context, Result};
use callsim_http::DefaultCallerClient;
use callsim_runtime::CallerController;
use tracing::debug;

use crate::parser::Cli;
use crate::presentation::TerminalView;

/// Fully composed context for the console loop.
pub struct CliContext {
    pub controller: CallerController,
    /// Same view the controller renders into, for the read-back commands.
    pub view: Arc<TerminalView>,
}

/// Build the controller from parsed flags. Does not contact the backend.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let http_config = cli.http_config();
    let client = DefaultCallerClient::new(&http_config)
        .with_context(|| format!("Invalid backend URL '{}'", http_config.base_url()))?;
    debug!(base_url = %http_config.base_url(), "Backend client ready");

    let view = Arc::new(TerminalView::new());
    let controller = CallerController::new(
        Arc::new(client),
        Arc::clone(&view) as Arc<dyn callsim_core::CallerView>,
        cli.controller_settings(),
    )
    .context("Invalid controller settings")?;

    Ok(CliContext { controller, view })
}
