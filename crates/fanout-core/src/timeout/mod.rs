use std::time::Duration;

use fanout_model::{RequestedTasks, TimeoutMs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{env::BuildEnvironment, lifecycle::names, matcher::is_any_requested};

/// 30 minutes.
pub const SHORT_TIMEOUT_MS: TimeoutMs = 30 * 60 * 1000;
/// 2 hours 45 minutes.
pub const DEFAULT_TIMEOUT_MS: TimeoutMs = (2 * 60 + 45) * 60 * 1000;

/// Decides how long a CI build may run before diagnostics are collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutPolicy {
    /// Task names that identify a short build.
    pub short_tasks: Vec<String>,
    /// Timeout applied when any short task is requested.
    pub short_timeout_ms: TimeoutMs,
    /// Timeout for every other build.
    pub default_timeout_ms: TimeoutMs,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            short_tasks: vec![
                names::COMPILE_ALL_BUILD.to_string(),
                names::SANITY_CHECK.to_string(),
                names::QUICK_TEST.to_string(),
            ],
            short_timeout_ms: SHORT_TIMEOUT_MS,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TimeoutPolicy {
    /// Timeout for a build that was invoked with `requested`.
    pub fn compute(&self, requested: &RequestedTasks) -> Duration {
        let short = is_any_requested(self.short_tasks.iter().map(String::as_str), requested);
        let ms = if short {
            self.short_timeout_ms
        } else {
            self.default_timeout_ms
        };
        debug!(target: "fanout.core.timeout", short, timeout_ms = ms, "timeout computed");
        Duration::from_millis(ms)
    }

    /// Timeout for `requested`, or `None` outside CI where no monitor is armed.
    pub fn for_environment(
        &self,
        requested: &RequestedTasks,
        env: &BuildEnvironment,
    ) -> Option<Duration> {
        env.is_ci_server().then(|| self.compute(requested))
    }
}
