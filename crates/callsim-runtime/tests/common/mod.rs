//! Shared doubles for controller integration tests.
//!
//! `ScriptedBackend` answers each endpoint from a canned script and records
//! every request it receives. `RecordingView` records every render call.
//! Gates (`tokio::sync::Notify`) hold a response back until the test releases
//! it, which is how in-flight races are staged.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use callsim_core::display::{GenderToggle, LaunchButton, PhoneContent, VoiceList};
use callsim_core::domain::Scenario;
use callsim_core::ports::{
    BackendError, BackendResult, CallerBackendPort, CallerView, Endpoint, LaunchRequest,
    LaunchResponse, LogsResponse, OptionsResponse,
};
use callsim_core::{CallerLifecycleState, ControllerSettings};
use callsim_runtime::CallerController;
use serde_json::{Value, json};
use tokio::sync::Notify;

pub const MARKER: &str = "Models are loaded and ready.";

// ── Backend ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedBackend {
    options: Mutex<Option<BackendResult<OptionsResponse>>>,
    launch: Mutex<Option<BackendResult<LaunchResponse>>>,
    logs: Mutex<VecDeque<BackendResult<LogsResponse>>>,
    run: Mutex<Option<BackendResult<Value>>>,
    stop: Mutex<Option<BackendResult<Value>>>,
    launch_gate: Option<Arc<Notify>>,
    logs_gate: Option<Arc<Notify>>,
    stop_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    launch_requests: Mutex<Vec<LaunchRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(self, value: Value) -> Self {
        let options = serde_json::from_value(value).unwrap();
        *self.options.lock().unwrap() = Some(Ok(options));
        self
    }

    pub fn with_options_error(self) -> Self {
        self.set_options_error();
        self
    }

    /// Make subsequent `/options` fetches fail.
    pub fn set_options_error(&self) {
        *self.options.lock().unwrap() = Some(Err(BackendError::transport(
            Endpoint::Options,
            "connection refused",
        )));
    }

    pub fn with_launch(self, value: Value) -> Self {
        let response = serde_json::from_value(value).unwrap();
        *self.launch.lock().unwrap() = Some(Ok(response));
        self
    }

    pub fn with_launch_error(self) -> Self {
        *self.launch.lock().unwrap() = Some(Err(BackendError::transport(
            Endpoint::Launch,
            "connection refused",
        )));
        self
    }

    /// Script `/logs` responses in order. The last one repeats.
    pub fn with_logs(self, logs: &[&str]) -> Self {
        self.logs
            .lock()
            .unwrap()
            .extend(logs.iter().map(|l| Ok(LogsResponse::new(*l))));
        self
    }

    pub fn with_logs_error(self) -> Self {
        self.logs
            .lock()
            .unwrap()
            .push_back(Err(BackendError::transport(Endpoint::Logs, "reset by peer")));
        self
    }

    pub fn with_run_error(self) -> Self {
        *self.run.lock().unwrap() = Some(Err(BackendError::transport(
            Endpoint::Run,
            "connection refused",
        )));
        self
    }

    pub fn with_stop_error(self) -> Self {
        *self.stop.lock().unwrap() = Some(Err(BackendError::transport(
            Endpoint::Stop,
            "connection refused",
        )));
        self
    }

    pub fn with_launch_gate(mut self, gate: &Arc<Notify>) -> Self {
        self.launch_gate = Some(Arc::clone(gate));
        self
    }

    pub fn with_logs_gate(mut self, gate: &Arc<Notify>) -> Self {
        self.logs_gate = Some(Arc::clone(gate));
        self
    }

    pub fn with_stop_gate(mut self, gate: &Arc<Notify>) -> Self {
        self.stop_gate = Some(Arc::clone(gate));
        self
    }

    /// Every request received, as `"GET /options"`, `"POST /launch"`, ...
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn launch_requests(&self) -> Vec<LaunchRequest> {
        self.launch_requests.lock().unwrap().clone()
    }

    fn record(&self, endpoint: Endpoint) {
        let method = if endpoint.is_post() { "POST" } else { "GET" };
        self.calls
            .lock()
            .unwrap()
            .push(format!("{method} {endpoint}"));
    }

    async fn pass(gate: Option<&Arc<Notify>>) {
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl CallerBackendPort for ScriptedBackend {
    async fn fetch_options(&self) -> BackendResult<OptionsResponse> {
        self.record(Endpoint::Options);
        self.options
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(OptionsResponse::default()))
    }

    async fn launch(&self, request: &LaunchRequest) -> BackendResult<LaunchResponse> {
        self.record(Endpoint::Launch);
        self.launch_requests.lock().unwrap().push(request.clone());
        Self::pass(self.launch_gate.as_ref()).await;
        self.launch
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(LaunchResponse::with_status("launched")))
    }

    async fn fetch_logs(&self) -> BackendResult<LogsResponse> {
        self.record(Endpoint::Logs);
        Self::pass(self.logs_gate.as_ref()).await;
        let mut logs = self.logs.lock().unwrap();
        if logs.len() > 1 {
            logs.pop_front().unwrap()
        } else {
            logs.front()
                .cloned()
                .unwrap_or_else(|| Ok(LogsResponse::default()))
        }
    }

    async fn run(&self) -> BackendResult<Value> {
        self.record(Endpoint::Run);
        self.run
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(json!({"status": "running"})))
    }

    async fn stop(&self) -> BackendResult<Value> {
        self.record(Endpoint::Stop);
        Self::pass(self.stop_gate.as_ref()).await;
        self.stop
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(json!({"status": "terminated"})))
    }
}

// ── View ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Phone(PhoneContent),
    LoadingText(String),
    CallTimer(String),
    Clock(String),
    LaunchButton(LaunchButton),
    Scenarios(Vec<Scenario>),
    Voices(VoiceList),
    GenderToggles(Vec<GenderToggle>),
    Status(String),
    Logs(String),
    Alert(String),
}

#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn phones(&self) -> Vec<PhoneContent> {
        self.filter(|c| match c {
            ViewCall::Phone(p) => Some(p.clone()),
            _ => None,
        })
    }

    pub fn phone_states(&self) -> Vec<CallerLifecycleState> {
        self.phones().into_iter().map(|p| p.state).collect()
    }

    pub fn last_phone(&self) -> PhoneContent {
        self.phones().pop().expect("no phone render")
    }

    pub fn alerts(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::Alert(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn statuses(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::Status(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn loading_texts(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::LoadingText(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn call_timers(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::CallTimer(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn clocks(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::Clock(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn logs(&self) -> Vec<String> {
        self.filter(|c| match c {
            ViewCall::Logs(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn last_voices(&self) -> Option<VoiceList> {
        self.filter(|c| match c {
            ViewCall::Voices(v) => Some(v.clone()),
            _ => None,
        })
        .pop()
    }

    pub fn last_toggles(&self) -> Option<Vec<GenderToggle>> {
        self.filter(|c| match c {
            ViewCall::GenderToggles(t) => Some(t.clone()),
            _ => None,
        })
        .pop()
    }

    pub fn last_launch_button(&self) -> Option<LaunchButton> {
        self.filter(|c| match c {
            ViewCall::LaunchButton(b) => Some(*b),
            _ => None,
        })
        .pop()
    }

    fn filter<T>(&self, f: impl Fn(&ViewCall) -> Option<T>) -> Vec<T> {
        self.calls.lock().unwrap().iter().filter_map(f).collect()
    }
}

impl CallerView for RecordingView {
    fn render_phone(&self, content: &PhoneContent) {
        self.push(ViewCall::Phone(content.clone()));
    }

    fn set_loading_text(&self, text: &str) {
        self.push(ViewCall::LoadingText(text.to_string()));
    }

    fn set_call_timer(&self, text: &str) {
        self.push(ViewCall::CallTimer(text.to_string()));
    }

    fn set_clock(&self, text: &str) {
        self.push(ViewCall::Clock(text.to_string()));
    }

    fn set_launch_button(&self, button: &LaunchButton) {
        self.push(ViewCall::LaunchButton(*button));
    }

    fn set_scenarios(&self, scenarios: &[Scenario]) {
        self.push(ViewCall::Scenarios(scenarios.to_vec()));
    }

    fn set_voices(&self, voices: &VoiceList) {
        self.push(ViewCall::Voices(voices.clone()));
    }

    fn set_gender_toggles(&self, toggles: &[GenderToggle]) {
        self.push(ViewCall::GenderToggles(toggles.to_vec()));
    }

    fn set_status(&self, text: &str) {
        self.push(ViewCall::Status(text.to_string()));
    }

    fn set_logs(&self, text: &str) {
        self.push(ViewCall::Logs(text.to_string()));
    }

    fn alert(&self, message: &str) {
        self.push(ViewCall::Alert(message.to_string()));
    }
}

// ── Helpers ────────────────────────────────────────────────────────

pub fn demo_options() -> Value {
    json!({
        "scenarios": [{"id": "s1", "label": "Demo"}],
        "voices": [
            {"id": "female", "voices": [{"id": "v1", "label": "Voice A"}]},
            {"id": "male", "voices": []}
        ]
    })
}

/// Default timings, with the log panel refresh pushed out of the way so
/// `/logs` counts only reflect readiness polls.
pub fn test_settings() -> ControllerSettings {
    ControllerSettings::new().with_log_refresh_interval(Duration::from_secs(3600))
}

pub fn controller(backend: &Arc<ScriptedBackend>, view: &Arc<RecordingView>) -> CallerController {
    let backend: Arc<dyn CallerBackendPort> = Arc::clone(backend) as _;
    let view: Arc<dyn CallerView> = Arc::clone(view) as _;
    CallerController::new(backend, view, test_settings()).unwrap()
}

/// Let spawned tasks run without advancing the clock.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Load the demo options and select scenario `s1` with voice `v1`.
pub async fn select_demo(controller: &CallerController) {
    controller.load_options().await.unwrap();
    controller.select_scenario("s1");
    controller.select_voice("v1");
}

/// Drive a controller whose backend reports the marker on the first poll
/// all the way to `Ready`.
pub async fn make_ready(controller: &CallerController) {
    select_demo(controller).await;
    controller.launch().await.unwrap();
    settle().await;
    assert_eq!(controller.lifecycle(), CallerLifecycleState::Ready);
}
