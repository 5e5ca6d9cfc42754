//! Phone status-bar clock.

use callsim_core::display::format_phone_time;
use callsim_core::ports::CallerView;
use chrono::Local;

/// Render the current local time to the view.
pub(crate) fn render_clock(view: &dyn CallerView) {
    view.set_clock(&format_phone_time(&Local::now()));
}
