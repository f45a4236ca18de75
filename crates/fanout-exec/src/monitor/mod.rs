//! One-shot diagnostic timer.
//!
//! A [`MonitorHandle`] moves from `Armed` to exactly one of `Fired` or `Cancelled`.
//! Both transitions are a compare-and-swap on the same state word, so once `cancel` wins the action can no longer start.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::{action::DiagnosticAction, error::ExecError, util::host};

const ARMED: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Armed,
    /// Timeout elapsed and the action was started.
    Fired,
    Cancelled,
}

impl MonitorState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            FIRED => MonitorState::Fired,
            CANCELLED => MonitorState::Cancelled,
            _ => MonitorState::Armed,
        }
    }
}

/// Schedules a [`DiagnosticAction`] to run once after a timeout.
pub struct DiagnosticMonitor {
    name: &'static str,
    action: Arc<dyn DiagnosticAction>,
}

impl DiagnosticMonitor {
    pub fn new(action: Arc<dyn DiagnosticAction>) -> Self {
        Self {
            name: "timeout-monitor",
            action,
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Arm the monitor on the current tokio runtime.
    ///
    /// The timer runs on the runtime's workers, never on the calling thread.
    /// Fails with [`ExecError::NoRuntime`] outside a runtime.
    pub fn arm(&self, timeout: Duration) -> Result<MonitorHandle, ExecError> {
        let rt = tokio::runtime::Handle::try_current().map_err(|_| ExecError::NoRuntime)?;

        let token = CancellationToken::new();
        let state = Arc::new(AtomicU8::new(ARMED));

        let task = rt.spawn(watch(
            self.name,
            timeout,
            Arc::clone(&self.action),
            token.clone(),
            Arc::clone(&state),
        ));

        debug!(
            target: "fanout.exec.monitor",
            monitor = self.name,
            action = self.action.name(),
            timeout_ms = millis(timeout),
            "monitor armed"
        );
        Ok(MonitorHandle {
            name: self.name,
            timeout,
            token,
            state,
            task: Some(task),
        })
    }
}

async fn watch(
    name: &'static str,
    timeout: Duration,
    action: Arc<dyn DiagnosticAction>,
    cancel: CancellationToken,
    state: Arc<AtomicU8>,
) {
    tokio::select! {
        _ = cancel.cancelled() => {
            trace!(target: "fanout.exec.monitor", monitor = name, "cancelled before timeout");
        }
        _ = tokio::time::sleep(timeout) => {
            if state
                .compare_exchange(ARMED, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            warn!(
                target: "fanout.exec.monitor",
                monitor = name,
                host = %host(),
                timeout_ms = millis(timeout),
                action = action.name(),
                "build timeout elapsed; collecting diagnostics"
            );
            match action.run().await {
                Ok(()) => {
                    info!(target: "fanout.exec.monitor", monitor = name, "diagnostics collected")
                }
                Err(e) => warn!(
                    target: "fanout.exec.monitor",
                    monitor = name,
                    error = %e,
                    "diagnostic action failed"
                ),
            }
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Owner of an armed monitor.
///
/// Dropping the handle cancels the monitor.
pub struct MonitorHandle {
    name: &'static str,
    timeout: Duration,
    token: CancellationToken,
    state: Arc<AtomicU8>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Cancel the monitor and return its final state.
    ///
    /// Safe to call any number of times. Returns [`MonitorState::Fired`] when the action already started; it is left to finish.
    pub fn cancel(&self) -> MonitorState {
        let _ = self
            .state
            .compare_exchange(ARMED, CANCELLED, Ordering::AcqRel, Ordering::Acquire);
        self.token.cancel();

        let state = self.state();
        trace!(target: "fanout.exec.monitor", monitor = self.name, ?state, "cancel requested");
        state
    }

    pub fn state(&self) -> MonitorState {
        MonitorState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Wait for the timer task to end (cancelled, or fired and action finished).
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorHandle")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .field("state", &self.state())
            .finish()
    }
}
