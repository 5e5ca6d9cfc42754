//! Phone panel rendering.
//!
//! `render` is a pure function of the lifecycle state and the two labels.
//! Timers (ellipsis, call readout) are driven by the runtime; this module
//! only produces their initial text.

use serde::{Deserialize, Serialize};

use super::ellipsis::LOADING_TEXT_INITIAL;
use crate::domain::{CallerLifecycleState, format_elapsed};

/// State of the round call button under the phone panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallButton {
    /// Greyed out, not clickable.
    Disabled,
    /// Green, starts the call.
    Start,
    /// Red, ends the call.
    End,
}

impl CallButton {
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Renderable phone panel content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneContent {
    pub state: CallerLifecycleState,
    pub title: String,
    pub subtitle: String,
    pub call_button: CallButton,
    /// Animated wait text; only set while connecting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<String>,
    /// `MM:SS` readout; only set while connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_timer: Option<String>,
}

/// Render the phone panel for a lifecycle state.
///
/// The labels are only used by `Connected`.
pub fn render(
    state: CallerLifecycleState,
    scenario_label: &str,
    gender_label: &str,
) -> PhoneContent {
    match state {
        CallerLifecycleState::NotLoaded => PhoneContent {
            state,
            title: "Caller not loaded yet".to_string(),
            subtitle: "Load the caller on the left side".to_string(),
            call_button: CallButton::Disabled,
            loading_text: None,
            call_timer: None,
        },
        CallerLifecycleState::Connecting => PhoneContent {
            state,
            title: "Connecting".to_string(),
            subtitle: String::new(),
            call_button: CallButton::Disabled,
            loading_text: Some(LOADING_TEXT_INITIAL.to_string()),
            call_timer: None,
        },
        CallerLifecycleState::Ready => PhoneContent {
            state,
            title: "Ready to start".to_string(),
            subtitle: "Tap the button below to begin".to_string(),
            call_button: CallButton::Start,
            loading_text: None,
            call_timer: None,
        },
        CallerLifecycleState::Connected => PhoneContent {
            state,
            title: "Call in progress".to_string(),
            subtitle: call_subtitle(scenario_label, gender_label),
            call_button: CallButton::End,
            loading_text: None,
            call_timer: Some(format_elapsed(0)),
        },
    }
}

/// `"{scenario} - {Gender}"`, or the scenario label alone when either part
/// is missing.
pub fn call_subtitle(scenario_label: &str, gender_label: &str) -> String {
    let gender = capitalize(gender_label);
    if scenario_label.is_empty() || gender.is_empty() {
        scenario_label.to_string()
    } else {
        format!("{scenario_label} - {gender}")
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
