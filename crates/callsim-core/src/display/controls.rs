//! View models for the controls beside the phone panel.

use serde::{Deserialize, Serialize};

use crate::domain::{CallerLifecycleState, Gender, VoiceOption};

/// Placeholder entry shown when a gender has no voices.
pub const NO_VOICES_PLACEHOLDER: &str = "(no voices found)";

/// Visual weight of the launch button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonTone {
    Primary,
    Danger,
}

/// The multi-purpose load / cancel / stop button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaunchButton {
    pub label: &'static str,
    pub enabled: bool,
    pub tone: ButtonTone,
}

impl LaunchButton {
    /// Derive the button from the lifecycle state.
    ///
    /// `stopping` is true while a stop request is still in flight; the button
    /// is then disabled regardless of state.
    pub const fn for_state(state: CallerLifecycleState, stopping: bool) -> Self {
        if stopping {
            return Self {
                label: "Stopping...",
                enabled: false,
                tone: ButtonTone::Danger,
            };
        }

        let (label, tone) = match state {
            CallerLifecycleState::NotLoaded => ("Load caller", ButtonTone::Primary),
            CallerLifecycleState::Connecting => ("Cancel loading", ButtonTone::Danger),
            CallerLifecycleState::Ready => ("Stop caller", ButtonTone::Danger),
            CallerLifecycleState::Connected => ("End & unload", ButtonTone::Danger),
        };

        Self {
            label,
            enabled: true,
            tone,
        }
    }
}

/// Voice dropdown content for the active gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VoiceList {
    /// Selectable voices, in catalog order.
    Voices { entries: Vec<VoiceOption> },
    /// Disabled control showing [`NO_VOICES_PLACEHOLDER`].
    Empty,
}

impl VoiceList {
    pub fn from_voices(voices: &[VoiceOption]) -> Self {
        if voices.is_empty() {
            Self::Empty
        } else {
            Self::Voices {
                entries: voices.to_vec(),
            }
        }
    }

    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Labels as displayed, including the placeholder when empty.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Voices { entries } => entries.iter().map(|v| v.label.as_str()).collect(),
            Self::Empty => vec![NO_VOICES_PLACEHOLDER],
        }
    }
}

/// One gender toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderToggle {
    pub gender: Gender,
    pub active: bool,
}

/// One toggle per gender, exactly one of them active.
pub fn gender_toggles(active: Gender) -> Vec<GenderToggle> {
    Gender::ALL
        .into_iter()
        .map(|gender| GenderToggle {
            gender,
            active: gender == active,
        })
        .collect()
}
