//! Minimal port doubles for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use callsim_core::display::{GenderToggle, LaunchButton, PhoneContent, VoiceList};
use callsim_core::domain::Scenario;
use callsim_core::ports::{
    BackendError, BackendResult, CallerBackendPort, CallerView, LaunchRequest, LaunchResponse,
    LogsResponse, OptionsResponse,
};
use serde_json::Value;

/// Backend that only answers `/logs`.
pub struct LogsBackend {
    logs: BackendResult<LogsResponse>,
}

impl LogsBackend {
    pub fn with_log(text: &str) -> Self {
        Self {
            logs: Ok(LogsResponse::new(text)),
        }
    }

    pub fn without_log() -> Self {
        Self {
            logs: Ok(LogsResponse { log: None }),
        }
    }

    pub const fn failing(err: BackendError) -> Self {
        Self { logs: Err(err) }
    }
}

fn unsupported<T>() -> BackendResult<T> {
    Err(BackendError::Configuration("not supported by LogsBackend".to_string()))
}

#[async_trait]
impl CallerBackendPort for LogsBackend {
    async fn fetch_options(&self) -> BackendResult<OptionsResponse> {
        unsupported()
    }

    async fn launch(&self, _request: &LaunchRequest) -> BackendResult<LaunchResponse> {
        unsupported()
    }

    async fn fetch_logs(&self) -> BackendResult<LogsResponse> {
        self.logs.clone()
    }

    async fn run(&self) -> BackendResult<Value> {
        unsupported()
    }

    async fn stop(&self) -> BackendResult<Value> {
        unsupported()
    }
}

/// View that records only the log panel and clock.
#[derive(Default)]
pub struct LogsView {
    logs: Mutex<Vec<String>>,
    clock: Mutex<Option<String>>,
}

impl LogsView {
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }

    pub fn clock(&self) -> Option<String> {
        self.clock.lock().unwrap().clone()
    }
}

impl CallerView for LogsView {
    fn render_phone(&self, _content: &PhoneContent) {}
    fn set_loading_text(&self, _text: &str) {}
    fn set_call_timer(&self, _text: &str) {}

    fn set_clock(&self, text: &str) {
        *self.clock.lock().unwrap() = Some(text.to_string());
    }

    fn set_launch_button(&self, _button: &LaunchButton) {}
    fn set_scenarios(&self, _scenarios: &[Scenario]) {}
    fn set_voices(&self, _voices: &VoiceList) {}
    fn set_gender_toggles(&self, _toggles: &[GenderToggle]) {}
    fn set_status(&self, _text: &str) {}

    fn set_logs(&self, text: &str) {
        self.logs.lock().unwrap().push(text.to_string());
    }

    fn alert(&self, _message: &str) {}
}
