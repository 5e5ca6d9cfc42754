//! Rendering port.
//!
//! The controller pushes view models to a `CallerView`; it never reads
//! anything back. Implementations convert them to whatever the front end
//! needs (terminal output, GUI widgets, test recorders).

use crate::display::{GenderToggle, LaunchButton, PhoneContent, VoiceList};
use crate::domain::Scenario;

/// Port for rendering controller output.
///
/// - **Object-safe**: used as `Arc<dyn CallerView>`
/// - **Fire-and-forget**: methods don't return `Result`; adapters handle
///   their own errors
pub trait CallerView: Send + Sync {
    /// Replace the phone panel content.
    fn render_phone(&self, content: &PhoneContent);

    /// Update the animated "Please wait" text while connecting.
    fn set_loading_text(&self, text: &str);

    /// Update the `MM:SS` call readout.
    fn set_call_timer(&self, text: &str);

    /// Update the phone's wall clock.
    fn set_clock(&self, text: &str);

    fn set_launch_button(&self, button: &LaunchButton);

    fn set_scenarios(&self, scenarios: &[Scenario]);

    fn set_voices(&self, voices: &VoiceList);

    fn set_gender_toggles(&self, toggles: &[GenderToggle]);

    /// Replace the status panel text.
    fn set_status(&self, text: &str);

    /// Replace the log panel text verbatim.
    fn set_logs(&self, text: &str);

    /// Show a blocking-style notice to the user.
    fn alert(&self, message: &str);
}

/// No-op implementation for tests and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopView;

impl CallerView for NoopView {
    fn render_phone(&self, _content: &PhoneContent) {}
    fn set_loading_text(&self, _text: &str) {}
    fn set_call_timer(&self, _text: &str) {}
    fn set_clock(&self, _text: &str) {}
    fn set_launch_button(&self, _button: &LaunchButton) {}
    fn set_scenarios(&self, _scenarios: &[Scenario]) {}
    fn set_voices(&self, _voices: &VoiceList) {}
    fn set_gender_toggles(&self, _toggles: &[GenderToggle]) {}
    fn set_status(&self, _text: &str) {}
    fn set_logs(&self, _text: &str) {}
    fn alert(&self, _message: &str) {}
}
