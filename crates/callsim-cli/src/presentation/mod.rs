//! Terminal presentation.
//!
//! [`TerminalView`] is the console's [`CallerView`](callsim_core::CallerView).
//! The `format_*` helpers are format-only and shared by the view and the
//! `status`/`scenarios`/`voices` commands.

pub mod format;
pub mod terminal_view;

pub use format::{format_phone, format_scenarios, format_voices};
pub use terminal_view::{PanelSnapshot, TerminalView};
