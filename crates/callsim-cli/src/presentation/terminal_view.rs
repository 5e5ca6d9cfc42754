//! Console implementation of the rendering port.
//!
//! Fast-changing panels (clock, wait animation, call timer, logs) are only
//! stored; printing them on every tick would flood the prompt. Lifecycle
//! changes, status text and alerts are printed as they arrive.

use std::sync::{Mutex, MutexGuard, PoisonError};

use callsim_core::{
    CallerView, GenderToggle, LaunchButton, PhoneContent, Scenario, VoiceList,
};

/// Latest content of every panel.
#[derive(Debug, Clone, Default)]
pub struct PanelSnapshot {
    pub phone: Option<PhoneContent>,
    pub loading_text: String,
    pub call_timer: String,
    pub clock: String,
    pub launch_button: Option<LaunchButton>,
    pub scenarios: Vec<Scenario>,
    pub voices: Option<VoiceList>,
    pub gender_toggles: Vec<GenderToggle>,
    pub status: String,
    pub logs: String,
}

impl PanelSnapshot {
    /// Phone panel with the live wait text and timer filled in.
    pub fn live_phone(&self) -> Option<PhoneContent> {
        let mut phone = self.phone.clone()?;
        if phone.loading_text.is_some() && !self.loading_text.is_empty() {
            phone.loading_text = Some(self.loading_text.clone());
        }
        if phone.call_timer.is_some() && !self.call_timer.is_empty() {
            phone.call_timer = Some(self.call_timer.clone());
        }
        Some(phone)
    }
}

/// Writes controller output to stdout.
#[derive(Debug, Default)]
pub struct TerminalView {
    panels: Mutex<PanelSnapshot>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every panel's latest content.
    pub fn snapshot(&self) -> PanelSnapshot {
        self.panels().clone()
    }

    fn panels(&self) -> MutexGuard<'_, PanelSnapshot> {
        self.panels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CallerView for TerminalView {
    fn render_phone(&self, content: &PhoneContent) {
        let mut panels = self.panels();
        let changed = panels
            .phone
            .as_ref()
            .is_none_or(|p| p.state != content.state || p.title != content.title);
        panels.loading_text = content.loading_text.clone().unwrap_or_default();
        panels.call_timer = content.call_timer.clone().unwrap_or_default();
        panels.phone = Some(content.clone());
        drop(panels);

        if changed {
            if content.subtitle.is_empty() {
                println!("[phone] {}", content.title);
            } else {
                println!("[phone] {}: {}", content.title, content.subtitle);
            }
        }
    }

    fn set_loading_text(&self, text: &str) {
        self.panels().loading_text = text.to_string();
    }

    fn set_call_timer(&self, text: &str) {
        self.panels().call_timer = text.to_string();
    }

    fn set_clock(&self, text: &str) {
        self.panels().clock = text.to_string();
    }

    fn set_launch_button(&self, button: &LaunchButton) {
        self.panels().launch_button = Some(*button);
    }

    fn set_scenarios(&self, scenarios: &[Scenario]) {
        self.panels().scenarios = scenarios.to_vec();
    }

    fn set_voices(&self, voices: &VoiceList) {
        self.panels().voices = Some(voices.clone());
    }

    fn set_gender_toggles(&self, toggles: &[GenderToggle]) {
        self.panels().gender_toggles = toggles.to_vec();
    }

    fn set_status(&self, text: &str) {
        self.panels().status = text.to_string();
        if !text.is_empty() {
            println!("[status]\n{text}");
        }
    }

    fn set_logs(&self, text: &str) {
        self.panels().logs = text.to_string();
    }

    fn alert(&self, message: &str) {
        println!("[alert] {message}");
    }
}
