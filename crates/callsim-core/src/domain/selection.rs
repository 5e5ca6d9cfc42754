//! The user's current scenario / gender / voice choice.

use serde::{Deserialize, Serialize};

use super::options::{Gender, OptionsCatalog};
use crate::ports::{LaunchRequest, ValidationError};

/// Current selection. Scenario and voice stay `None` until picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub scenario: Option<String>,
    pub gender: Gender,
    pub voice: Option<String>,
}

impl Selection {
    pub const fn new(gender: Gender) -> Self {
        Self {
            scenario: None,
            gender,
            voice: None,
        }
    }

    /// Last write wins; an empty id clears the field.
    pub fn select_scenario(&mut self, id: impl Into<String>) {
        self.scenario = non_empty(id.into());
    }

    /// Last write wins; an empty id clears the field.
    pub fn select_voice(&mut self, id: impl Into<String>) {
        self.voice = non_empty(id.into());
    }

    /// Switch gender.
    ///
    /// A selected voice that is not in the new gender's list is cleared, so
    /// the selection never names a voice of the other gender.
    pub fn set_gender(&mut self, gender: Gender, catalog: &OptionsCatalog) {
        self.gender = gender;
        if self
            .voice
            .as_deref()
            .is_some_and(|v| !catalog.has_voice(gender, v))
        {
            self.voice = None;
        }
    }

    /// Drop a scenario or voice id the catalog no longer offers.
    pub fn retain_known(&mut self, catalog: &OptionsCatalog) {
        if self
            .scenario
            .as_deref()
            .is_some_and(|id| catalog.scenario_label(id).is_none())
        {
            self.scenario = None;
        }
        if self
            .voice
            .as_deref()
            .is_some_and(|v| !catalog.has_voice(self.gender, v))
        {
            self.voice = None;
        }
    }

    /// Turn the selection into a launch request, or report what is missing.
    pub fn to_launch_request(&self) -> Result<LaunchRequest, ValidationError> {
        let scenario = self
            .scenario
            .clone()
            .ok_or(ValidationError::MissingScenario)?;
        let voice = self.voice.clone().ok_or(ValidationError::MissingVoice)?;

        Ok(LaunchRequest {
            scenario,
            gender: self.gender,
            voice,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
