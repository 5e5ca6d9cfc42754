//! Scenario and voice catalog.
//!
//! The catalog is loaded once at startup from the backend's `/options`
//! endpoint and replaced wholesale on every successful fetch.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{OptionsResponse, VoiceGroupDto};

/// A selectable call scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Opaque identifier sent back to the backend on launch.
    pub id: String,
    /// Display text.
    pub label: String,
}

impl Scenario {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A selectable voice for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    /// Opaque identifier (the backend uses the voice folder name).
    pub id: String,
    /// Display text.
    pub label: String,
}

impl VoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Gender of the simulated caller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    /// Every gender, in toggle order.
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// Wire identifier (`"female"` / `"male"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gender identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gender '{0}' (expected 'female' or 'male')")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

/// Scenarios plus the per-gender voice lists.
///
/// Every [`Gender`] always has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsCatalog {
    scenarios: Vec<Scenario>,
    voices: BTreeMap<Gender, Vec<VoiceOption>>,
}

impl Default for OptionsCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl OptionsCatalog {
    /// Catalog with no scenarios and an empty voice list for each gender.
    pub fn empty() -> Self {
        Self {
            scenarios: Vec::new(),
            voices: Gender::ALL.into_iter().map(|g| (g, Vec::new())).collect(),
        }
    }

    /// Build a catalog from already-typed parts.
    pub fn new(
        scenarios: Vec<Scenario>,
        voices: impl IntoIterator<Item = (Gender, Vec<VoiceOption>)>,
    ) -> Self {
        let mut catalog = Self::empty();
        catalog.scenarios = scenarios;
        catalog.voices.extend(voices);
        catalog
    }

    /// Build a catalog from the `/options` response.
    ///
    /// Voice groups whose id is not a known gender, or whose `voices` field
    /// is not a list of `{id, label}` entries, are skipped. A later group for
    /// the same gender replaces an earlier one.
    pub fn from_response(response: OptionsResponse) -> Self {
        let mut catalog = Self::empty();
        catalog.scenarios = response.scenarios;

        for group in response.voices {
            if let Some((gender, voices)) = parse_group(group) {
                catalog.voices.insert(gender, voices);
            }
        }

        catalog
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Ordered voices for a gender, empty when the gender has none.
    pub fn voices_for(&self, gender: Gender) -> &[VoiceOption] {
        self.voices.get(&gender).map_or(&[], Vec::as_slice)
    }

    /// Display label for a scenario id.
    pub fn scenario_label(&self, id: &str) -> Option<&str> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.label.as_str())
    }

    pub fn has_voice(&self, gender: Gender, voice_id: &str) -> bool {
        self.voices_for(gender).iter().any(|v| v.id == voice_id)
    }
}

fn parse_group(group: VoiceGroupDto) -> Option<(Gender, Vec<VoiceOption>)> {
    let id = group.id?;
    let gender = match id.parse::<Gender>() {
        Ok(gender) => gender,
        Err(e) => {
            debug!(%e, "Skipping voice group");
            return None;
        }
    };

    let raw = group.voices?;
    if !raw.is_array() {
        debug!(gender = %gender, "Skipping voice group without a voice list");
        return None;
    }

    match serde_json::from_value::<Vec<VoiceOption>>(raw) {
        Ok(voices) => Some((gender, voices)),
        Err(e) => {
            debug!(gender = %gender, error = %e, "Skipping malformed voice group");
            None
        }
    }
}
