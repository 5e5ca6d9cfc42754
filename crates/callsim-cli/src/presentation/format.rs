//! Plain-text rendering of panels and option lists.

use callsim_core::{PhoneContent, Scenario, VoiceList};

/// Marker printed before the selected entry of a list.
const SELECTED: &str = "*";

/// Phone panel as a few indented lines.
pub fn format_phone(phone: &PhoneContent, clock: &str) -> String {
    let mut lines = vec![format!("  [{clock}] {}", phone.title)];
    if !phone.subtitle.is_empty() {
        lines.push(format!("  {}", phone.subtitle));
    }
    if let Some(loading) = &phone.loading_text {
        lines.push(format!("  {loading}"));
    }
    if let Some(timer) = &phone.call_timer {
        lines.push(format!("  {timer}"));
    }
    lines.join("\n")
}

/// Scenario list with the selected id marked.
pub fn format_scenarios(scenarios: &[Scenario], selected: Option<&str>) -> String {
    if scenarios.is_empty() {
        return "  (no scenarios)".to_string();
    }
    scenarios
        .iter()
        .map(|s| {
            let mark = if selected == Some(s.id.as_str()) { SELECTED } else { " " };
            format!(" {mark} {:<12} {}", s.id, s.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Voice list with the selected id marked, or the placeholder when empty.
pub fn format_voices(voices: &VoiceList, selected: Option<&str>) -> String {
    match voices {
        VoiceList::Voices { entries } => entries
            .iter()
            .map(|v| {
                let mark = if selected == Some(v.id.as_str()) { SELECTED } else { " " };
                format!(" {mark} {:<12} {}", v.id, v.label)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        VoiceList::Empty => format!("  {}", voices.labels().join("")),
    }
}
