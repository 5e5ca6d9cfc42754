//! Named repeating tasks.
//!
//! Every background loop the controller runs (readiness poll, call timer,
//! ellipsis animation, phone clock, log refresh) lives in a [`TaskSlots`]
//! registry keyed by [`TaskPurpose`]. Starting a task cancels the previous
//! task of the same purpose first, so at most one task per purpose is live.
//!
//! Cancellation removes the slot immediately. A tick that already passed its
//! `select!` may still be running; tick bodies re-check their token under
//! the controller lock before touching state.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What a repeating task is for. One live task per purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskPurpose {
    /// Polls `/logs` for the readiness marker while connecting.
    ReadinessPoll,
    /// Advances the call's elapsed-time counter.
    CallTimer,
    /// Animates the "Please wait" text while connecting.
    Ellipsis,
    /// Phone wall clock. Always on.
    Clock,
    /// Log panel refresh. Always on.
    LogTail,
}

impl TaskPurpose {
    /// Tasks that run for the whole controller lifetime and are never
    /// touched by lifecycle transitions.
    pub const fn is_always_on(self) -> bool {
        matches!(self, Self::Clock | Self::LogTail)
    }
}

impl fmt::Display for TaskPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadinessPoll => "readiness-poll",
            Self::CallTimer => "call-timer",
            Self::Ellipsis => "ellipsis",
            Self::Clock => "clock",
            Self::LogTail => "log-tail",
        };
        f.write_str(name)
    }
}

/// When the first tick of a repeating task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    /// Right away, then every period.
    Immediate,
    /// After one full period.
    AfterPeriod,
}

/// Handle for a running task.
struct TaskHandle {
    cancel_token: CancellationToken,
    join_handle: JoinHandle<()>,
}

/// Registry of live repeating tasks, at most one per [`TaskPurpose`].
///
/// Dropping the registry cancels every task it still holds.
#[derive(Default)]
pub struct TaskSlots {
    slots: HashMap<TaskPurpose, TaskHandle>,
}

impl TaskSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task for `purpose`, cancelling the current one first.
    ///
    /// `task` receives the new slot's cancellation token and must stop
    /// promptly once it fires. Must be called from within a tokio runtime.
    pub fn start<F, Fut>(&mut self, purpose: TaskPurpose, task: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.cancel(purpose) {
            debug!(%purpose, "Replaced running task");
        }

        let cancel_token = CancellationToken::new();
        let join_handle = tokio::spawn(task(cancel_token.clone()));
        self.slots.insert(
            purpose,
            TaskHandle {
                cancel_token,
                join_handle,
            },
        );
        debug!(%purpose, "Started repeating task");
    }

    /// Cancel and remove the task for `purpose`.
    ///
    /// Returns whether a task was present. Cancelling an empty slot is a
    /// no-op.
    pub fn cancel(&mut self, purpose: TaskPurpose) -> bool {
        let Some(handle) = self.slots.remove(&purpose) else {
            return false;
        };
        handle.cancel_token.cancel();
        debug!(%purpose, "Cancelled repeating task");
        true
    }

    /// Whether a task for `purpose` is registered and still running.
    pub fn is_active(&self, purpose: TaskPurpose) -> bool {
        self.slots
            .get(&purpose)
            .is_some_and(|h| !h.join_handle.is_finished())
    }

    /// Purposes with a live task, in a stable order.
    pub fn active(&self) -> Vec<TaskPurpose> {
        let mut purposes: Vec<_> = self
            .slots
            .iter()
            .filter(|(_, h)| !h.join_handle.is_finished())
            .map(|(p, _)| *p)
            .collect();
        purposes.sort_unstable();
        purposes
    }

    /// Cancel every task, the always-on ones included.
    pub fn cancel_all(&mut self) {
        for (purpose, handle) in self.slots.drain() {
            debug!(%purpose, "Cancelling task during shutdown");
            handle.cancel_token.cancel();
        }
    }
}

impl Drop for TaskSlots {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Drive `on_tick` every `period` until it breaks or `cancel_token` fires.
///
/// A tick in progress is abandoned when the token fires, so a cancelled
/// poller never waits on its in-flight request. Missed ticks are skipped,
/// never burst.
pub async fn run_repeating<F, Fut>(
    period: Duration,
    first_tick: FirstTick,
    cancel_token: CancellationToken,
    mut on_tick: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ControlFlow<()>>,
{
    let start = match first_tick {
        FirstTick::Immediate => Instant::now(),
        FirstTick::AfterPeriod => Instant::now() + period,
    };
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel_token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            biased;
            () = cancel_token.cancelled() => break,
            flow = on_tick() => {
                if flow.is_break() {
                    break;
                }
            }
        }
    }
}
