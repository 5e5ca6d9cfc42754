//! Caller lifecycle coordinator.
//!
//! `CallerController` owns every piece of mutable controller state (lifecycle,
//! selection, options catalog, call session and the repeating tasks) behind a
//! single lock. All mutations go through its methods; background tasks only
//! hold a weak reference and re-check their cancellation token under the
//! lock, so a tick or response that lost a race with a teardown is dropped
//! instead of resurrecting a cancelled state.
//!
//! The lock is never held across an `.await`. View methods are called with
//! the lock held so renders land in the same order as state changes; a
//! `CallerView` must not call back into the controller.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use callsim_core::display::{self, LaunchButton, LoadingEllipsis, VoiceList, gender_toggles};
use callsim_core::domain::{
    CallSession, CallerLifecycleState, Gender, LifecycleAction, OptionsCatalog, Selection,
};
use callsim_core::ports::{CallerBackendPort, CallerView, ControllerError};
use callsim_core::settings::{ControllerSettings, SettingsError, validate_settings};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::render_clock;
use crate::log_tailer::refresh_logs;
use crate::readiness::check_ready;
use crate::tasks::{FirstTick, TaskPurpose, TaskSlots, run_repeating};

/// Status panel text after a launch request failed in transport.
pub const LAUNCH_FAILED_STATUS: &str = "Failed to launch. See console.";

const LAUNCH_FAILED_ALERT: &str = "Failed to launch";

/// Status panel text after the options fetch failed.
pub const OPTIONS_FAILED_STATUS: &str =
    "Failed to load options from server. Check /options route.";

/// Tasks torn down by every stop, cancel and failed launch.
const LIFECYCLE_TASKS: [TaskPurpose; 3] = [
    TaskPurpose::ReadinessPoll,
    TaskPurpose::CallTimer,
    TaskPurpose::Ellipsis,
];

// ============================================================================
// State
// ============================================================================

struct ControllerState {
    lifecycle: CallerLifecycleState,
    selection: Selection,
    catalog: OptionsCatalog,
    session: CallSession,
    /// Bumped by every launch and teardown. A response carrying an older
    /// epoch is stale.
    epoch: u64,
    /// Stop requests still in flight.
    pending_stops: usize,
    tasks: TaskSlots,
}

impl ControllerState {
    const fn launch_button(&self) -> LaunchButton {
        LaunchButton::for_state(self.lifecycle, self.pending_stops > 0)
    }

    fn scenario_label(&self) -> &str {
        self.selection
            .scenario
            .as_deref()
            .and_then(|id| self.catalog.scenario_label(id))
            .unwrap_or_default()
    }
}

struct Shared {
    backend: Arc<dyn CallerBackendPort>,
    view: Arc<dyn CallerView>,
    settings: ControllerSettings,
    state: Mutex<ControllerState>,
}

const fn continue_while(alive: bool) -> ControlFlow<()> {
    if alive {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for a task tick, or `None` once the task's slot was cancelled.
    fn lock_live(&self, token: &CancellationToken) -> Option<MutexGuard<'_, ControllerState>> {
        let state = self.lock();
        if token.is_cancelled() {
            None
        } else {
            Some(state)
        }
    }

    /// Re-render the phone and launch button for the current state.
    ///
    /// While connected, the call readout comes from the session, not from
    /// the renderer's `00:00`.
    ///
    /// The ellipsis animation is cancelled on every render and restarted
    /// only when entering `Connecting`.
    fn render(self: &Arc<Self>, state: &mut ControllerState) {
        state.tasks.cancel(TaskPurpose::Ellipsis);

        let mut content = display::render(
            state.lifecycle,
            state.scenario_label(),
            state.selection.gender.as_str(),
        );
        if state.lifecycle.is_call_active() {
            content.call_timer = Some(state.session.readout());
        }
        self.view.render_phone(&content);
        self.view.set_launch_button(&state.launch_button());

        if state.lifecycle.is_connecting() {
            self.start_ellipsis(state);
        }
    }

    fn fail_launch(self: &Arc<Self>, state: &mut ControllerState) {
        state.tasks.cancel(TaskPurpose::ReadinessPoll);
        state.lifecycle = state
            .lifecycle
            .apply(LifecycleAction::LaunchFailed)
            .unwrap_or_default();
        self.render(state);
    }

    fn mark_ready(self: &Arc<Self>, token: &CancellationToken) {
        let Some(mut state) = self.lock_live(token) else {
            debug!("Ignoring readiness from a cancelled poll");
            return;
        };

        match state.lifecycle.apply(LifecycleAction::ReadinessObserved) {
            Ok(next) => {
                state.tasks.cancel(TaskPurpose::ReadinessPoll);
                state.lifecycle = next;
                info!(state = %next, "Caller ready");
                self.render(&mut state);
            }
            Err(e) => debug!(error = %e, "Ignoring stale readiness"),
        }
    }

    // ------------------------------------------------------------------------
    // Repeating tasks
    // ------------------------------------------------------------------------

    fn start_ellipsis(self: &Arc<Self>, state: &mut ControllerState) {
        let weak = Arc::downgrade(self);
        let period = self.settings.ellipsis_interval;

        state.tasks.start(TaskPurpose::Ellipsis, move |token| async move {
            let tick_token = token.clone();
            let mut ellipsis = LoadingEllipsis::new();
            run_repeating(period, FirstTick::AfterPeriod, token, move || {
                let drawn = weak.upgrade().and_then(|shared| {
                    let _state = shared.lock_live(&tick_token)?;
                    shared.view.set_loading_text(&ellipsis.next_frame());
                    Some(())
                });
                std::future::ready(continue_while(drawn.is_some()))
            })
            .await;
        });
    }

    fn start_readiness_poll(self: &Arc<Self>, state: &mut ControllerState) {
        let weak = Arc::downgrade(self);
        let backend = Arc::clone(&self.backend);
        let marker = self.settings.readiness_marker.clone();
        let period = self.settings.readiness_poll_interval;

        state.tasks.start(TaskPurpose::ReadinessPoll, move |token| async move {
            let tick_token = token.clone();
            run_repeating(period, FirstTick::Immediate, token, move || {
                let weak = weak.clone();
                let backend = Arc::clone(&backend);
                let marker = marker.clone();
                let token = tick_token.clone();
                async move {
                    if !check_ready(backend.as_ref(), &marker).await {
                        return ControlFlow::Continue(());
                    }
                    if let Some(shared) = weak.upgrade() {
                        shared.mark_ready(&token);
                    }
                    ControlFlow::Break(())
                }
            })
            .await;
        });
    }

    fn start_call_timer(self: &Arc<Self>, state: &mut ControllerState) {
        let weak = Arc::downgrade(self);
        let period = self.settings.call_tick_interval;

        state.tasks.start(TaskPurpose::CallTimer, move |token| async move {
            let tick_token = token.clone();
            run_repeating(period, FirstTick::AfterPeriod, token, move || {
                let ticked = weak.upgrade().and_then(|shared| {
                    let mut state = shared.lock_live(&tick_token)?;
                    state.session.tick();
                    shared.view.set_call_timer(&state.session.readout());
                    Some(())
                });
                std::future::ready(continue_while(ticked.is_some()))
            })
            .await;
        });
    }

    fn start_background_tasks(&self, state: &mut ControllerState) {
        let view = Arc::clone(&self.view);
        state.tasks.start(TaskPurpose::Clock, {
            let period = self.settings.clock_interval;
            move |token| async move {
                run_repeating(period, FirstTick::Immediate, token, || {
                    render_clock(view.as_ref());
                    std::future::ready(ControlFlow::Continue(()))
                })
                .await;
            }
        });

        let backend = Arc::clone(&self.backend);
        let view = Arc::clone(&self.view);
        state.tasks.start(TaskPurpose::LogTail, {
            let period = self.settings.log_refresh_interval;
            move |token| async move {
                run_repeating(period, FirstTick::AfterPeriod, token, || {
                    let backend = Arc::clone(&backend);
                    let view = Arc::clone(&view);
                    async move {
                        refresh_logs(backend.as_ref(), view.as_ref()).await;
                        ControlFlow::Continue(())
                    }
                })
                .await;
            }
        });
    }
}

/// Marks a stop request in flight until dropped, so launches are refused
/// and the launch button reads "Stopping..." meanwhile.
struct PendingStop<'a> {
    shared: &'a Shared,
}

impl<'a> PendingStop<'a> {
    fn begin(shared: &'a Shared, state: &mut ControllerState) -> Self {
        state.pending_stops += 1;
        Self { shared }
    }
}

impl Drop for PendingStop<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.pending_stops = state.pending_stops.saturating_sub(1);
        if state.pending_stops == 0 {
            self.shared.view.set_launch_button(&state.launch_button());
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Client-side controller for the simulated phone call.
///
/// Cheap to clone; clones share state. Dropping the last clone cancels every
/// repeating task.
#[derive(Clone)]
pub struct CallerController {
    shared: Arc<Shared>,
}

impl CallerController {
    /// Create a controller in `NotLoaded` with an empty catalog.
    ///
    /// Nothing runs until [`start`](Self::start) is called.
    pub fn new(
        backend: Arc<dyn CallerBackendPort>,
        view: Arc<dyn CallerView>,
        settings: ControllerSettings,
    ) -> Result<Self, SettingsError> {
        validate_settings(&settings)?;

        let state = ControllerState {
            lifecycle: CallerLifecycleState::NotLoaded,
            selection: Selection::new(settings.default_gender),
            catalog: OptionsCatalog::empty(),
            session: CallSession::default(),
            epoch: 0,
            pending_stops: 0,
            tasks: TaskSlots::new(),
        };

        Ok(Self {
            shared: Arc::new(Shared {
                backend,
                view,
                settings,
                state: Mutex::new(state),
            }),
        })
    }

    /// Start the clock and log refresh, load options, then apply the
    /// default gender.
    ///
    /// An options failure is already shown on the status panel and does not
    /// stop the controller.
    pub async fn start(&self) {
        {
            let mut state = self.shared.lock();
            self.shared.start_background_tasks(&mut state);
        }

        if let Err(e) = self.load_options().await {
            debug!(error = %e, "Starting without options");
        }
        self.set_gender(self.shared.settings.default_gender);
    }

    /// Cancel every repeating task, the clock and log refresh included.
    ///
    /// Does not contact the backend; call [`stop_or_cancel`](Self::stop_or_cancel)
    /// first to unload the caller.
    pub fn shutdown(&self) {
        let mut state = self.shared.lock();
        state.epoch += 1;
        state.tasks.cancel_all();
        info!("Controller shut down");
    }

    // ------------------------------------------------------------------------
    // Options and selection
    // ------------------------------------------------------------------------

    /// Fetch scenarios and voices and replace the catalog in full.
    ///
    /// On failure the previous catalog is kept and the status panel says so.
    /// The phone is re-rendered either way.
    pub async fn load_options(&self) -> Result<(), ControllerError> {
        let result = self.shared.backend.fetch_options().await;

        let shared = &self.shared;
        let mut state = shared.lock();
        let outcome = match result {
            Ok(response) => {
                let state = &mut *state;
                state.catalog = OptionsCatalog::from_response(response);
                state.selection.retain_known(&state.catalog);
                info!(
                    scenarios = state.catalog.scenarios().len(),
                    "Options loaded"
                );

                shared.view.set_scenarios(state.catalog.scenarios());
                shared.view.set_voices(&VoiceList::from_voices(
                    state.catalog.voices_for(state.selection.gender),
                ));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load options");
                shared.view.set_status(OPTIONS_FAILED_STATUS);
                Err(e.into())
            }
        };

        shared.render(&mut state);
        outcome
    }

    /// Switch gender, refresh the voice list and the gender toggles.
    pub fn set_gender(&self, gender: Gender) {
        let mut state = self.shared.lock();
        let state = &mut *state;
        state.selection.set_gender(gender, &state.catalog);
        debug!(%gender, "Gender selected");

        self.shared.view.set_gender_toggles(&gender_toggles(gender));
        self.shared
            .view
            .set_voices(&VoiceList::from_voices(state.catalog.voices_for(gender)));
    }

    /// Select a scenario by id. An empty id clears the selection.
    pub fn select_scenario(&self, id: impl Into<String>) {
        self.shared.lock().selection.select_scenario(id);
    }

    /// Select a voice by id. An empty id clears the selection.
    pub fn select_voice(&self, id: impl Into<String>) {
        self.shared.lock().selection.select_voice(id);
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Launch the caller with the current selection.
    ///
    /// The phone enters `Connecting` before the request is sent so the
    /// launch can be cancelled while in flight. A response that arrives
    /// after such a cancel is ignored and reported as `Ok`.
    pub async fn launch(&self) -> Result<(), ControllerError> {
        let shared = &self.shared;

        let (request, epoch) = {
            let mut state = shared.lock();
            if state.pending_stops > 0 {
                return Err(ControllerError::Busy);
            }
            let next = state.lifecycle.apply(LifecycleAction::Launch)?;

            shared.view.set_status("");
            let request = match state.selection.to_launch_request() {
                Ok(request) => request,
                Err(e) => {
                    shared.view.alert(&e.to_string());
                    return Err(e.into());
                }
            };

            state.epoch += 1;
            state.lifecycle = next;
            info!(
                scenario = %request.scenario,
                gender = %request.gender,
                voice = %request.voice,
                epoch = state.epoch,
                "Launching caller"
            );
            shared.render(&mut state);
            (request, state.epoch)
        };

        let result = shared.backend.launch(&request).await;

        let mut state = shared.lock();
        if state.epoch != epoch || !state.lifecycle.is_connecting() {
            debug!(epoch, "Ignoring stale launch response");
            return Ok(());
        }

        match result {
            Ok(response) => {
                shared.view.set_status(&response.to_pretty_json());
                if response.outcome().is_running() {
                    debug!(status = %response.status, "Launch acknowledged");
                    shared.start_readiness_poll(&mut state);
                    Ok(())
                } else {
                    let message = response.failure_message();
                    warn!(%message, "Launch rejected");
                    shared.view.alert(&message);
                    shared.fail_launch(&mut state);
                    Err(ControllerError::LaunchRejected { message })
                }
            }
            Err(e) => {
                warn!(error = %e, "Launch request failed");
                shared.view.set_status(LAUNCH_FAILED_STATUS);
                shared.view.alert(LAUNCH_FAILED_ALERT);
                shared.fail_launch(&mut state);
                Err(e.into())
            }
        }
    }

    /// Tear everything down and unload the caller.
    ///
    /// Local teardown happens first and unconditionally: poll, call timer
    /// and ellipsis are cancelled, the session reset and the lifecycle set
    /// to `NotLoaded`. The stop request is then sent best-effort; its
    /// failure is only logged. Safe to call from any state and to call
    /// repeatedly.
    pub async fn stop_or_cancel(&self) {
        let shared = &self.shared;

        let _pending = {
            let mut state = shared.lock();
            let from = state.lifecycle;
            state.epoch += 1;
            for purpose in LIFECYCLE_TASKS {
                state.tasks.cancel(purpose);
            }
            state.session.reset();
            state.lifecycle = from.apply(LifecycleAction::Stop).unwrap_or_default();
            let pending = PendingStop::begin(shared, &mut state);
            info!(%from, epoch = state.epoch, "Stopping caller");
            shared.render(&mut state);
            pending
        };

        if let Err(e) = shared.backend.stop().await {
            warn!(error = %e, "Stop request failed");
        }
    }

    /// Start the call. Only valid while `Ready`.
    ///
    /// Any response body counts as success; only a failed request keeps the
    /// caller `Ready`.
    pub async fn start_call(&self) -> Result<(), ControllerError> {
        let shared = &self.shared;

        let epoch = {
            let state = shared.lock();
            state.lifecycle.apply(LifecycleAction::StartCall)?;
            state.epoch
        };

        if let Err(e) = shared.backend.run().await {
            warn!(error = %e, "Call start request failed");
            return Err(e.into());
        }

        let mut state = shared.lock();
        let next = match state.lifecycle.apply(LifecycleAction::StartCall) {
            Ok(next) if state.epoch == epoch => next,
            _ => {
                debug!(epoch, "Ignoring stale call start response");
                return Ok(());
            }
        };

        state.lifecycle = next;
        state.session.start();
        info!(scenario = state.scenario_label(), "Call started");
        shared.render(&mut state);
        shared.start_call_timer(&mut state);
        Ok(())
    }

    /// End the call. Ending a call also unloads the caller.
    pub async fn end_call(&self) {
        self.stop_or_cancel().await;
    }

    /// Launch button: loads the caller when `NotLoaded`, stops it otherwise.
    pub async fn press_launch_button(&self) -> Result<(), ControllerError> {
        let (active, stopping) = {
            let state = self.shared.lock();
            (state.lifecycle.is_active(), state.pending_stops > 0)
        };

        if stopping {
            return Err(ControllerError::Busy);
        }
        if active {
            self.stop_or_cancel().await;
            Ok(())
        } else {
            self.launch().await
        }
    }

    /// Call button: starts the call when `Ready`, ends it when `Connected`,
    /// ignored otherwise.
    pub async fn press_call_button(&self) -> Result<(), ControllerError> {
        match self.lifecycle() {
            CallerLifecycleState::Ready => self.start_call().await,
            CallerLifecycleState::Connected => {
                self.end_call().await;
                Ok(())
            }
            state @ (CallerLifecycleState::NotLoaded | CallerLifecycleState::Connecting) => {
                debug!(%state, "Call button ignored");
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn lifecycle(&self) -> CallerLifecycleState {
        self.shared.lock().lifecycle
    }

    pub fn session(&self) -> CallSession {
        self.shared.lock().session
    }

    pub fn selection(&self) -> Selection {
        self.shared.lock().selection.clone()
    }

    pub fn catalog(&self) -> OptionsCatalog {
        self.shared.lock().catalog.clone()
    }

    pub fn launch_button(&self) -> LaunchButton {
        self.shared.lock().launch_button()
    }

    /// Whether a stop request is still in flight.
    pub fn is_stopping(&self) -> bool {
        self.shared.lock().pending_stops > 0
    }

    /// Purposes with a live repeating task.
    pub fn active_tasks(&self) -> Vec<TaskPurpose> {
        self.shared.lock().tasks.active()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.shared.settings
    }
}
