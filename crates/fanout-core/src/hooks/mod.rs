use std::fmt;

use fanout_model::BuildOutcome;
use tracing::{debug, trace};

type FinishedCallback = Box<dyn FnOnce(&BuildOutcome) + Send + 'static>;

/// Callbacks run once when the build finishes.
///
/// The "build finished" event fires exactly once, whatever the outcome.
/// Hooks dropped before [`BuildHooks::build_finished`] is called fire with [`BuildOutcome::Cancelled`], so every exit path (early return, `?`, panic unwinding) still runs them.
#[derive(Default)]
pub struct BuildHooks {
    finished: Vec<(&'static str, FinishedCallback)>,
    outcome: Option<BuildOutcome>,
}

impl BuildHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the build-finished event.
    ///
    /// If the build already finished, `callback` runs immediately with the recorded outcome.
    pub fn on_build_finished<F>(&mut self, name: &'static str, callback: F)
    where
        F: FnOnce(&BuildOutcome) + Send + 'static,
    {
        if let Some(outcome) = &self.outcome {
            trace!(
                target: "fanout.core.hooks",
                name,
                "build already finished; running callback now"
            );
            callback(outcome);
            return;
        }
        self.finished.push((name, Box::new(callback)));
    }

    /// Fire the build-finished event.
    ///
    /// Returns the number of callbacks run. Calls after the first are no-ops returning `0`.
    pub fn build_finished(&mut self, outcome: BuildOutcome) -> usize {
        if self.outcome.is_some() {
            return 0;
        }
        debug!(
            target: "fanout.core.hooks",
            outcome = outcome.label(),
            callbacks = self.finished.len(),
            "build finished"
        );
        let callbacks = std::mem::take(&mut self.finished);
        let count = callbacks.len();
        for (name, cb) in callbacks {
            trace!(target: "fanout.core.hooks", name, "running build-finished callback");
            cb(&outcome);
        }
        self.outcome = Some(outcome);
        count
    }

    pub fn outcome(&self) -> Option<&BuildOutcome> {
        self.outcome.as_ref()
    }

    /// Number of callbacks waiting for the event.
    pub fn pending(&self) -> usize {
        self.finished.len()
    }
}

impl Drop for BuildHooks {
    fn drop(&mut self) {
        if self.outcome.is_none() && !self.finished.is_empty() {
            self.build_finished(BuildOutcome::Cancelled);
        }
    }
}

impl fmt::Debug for BuildHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildHooks")
            .field(
                "finished",
                &self.finished.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            )
            .field("outcome", &self.outcome)
            .finish()
    }
}
