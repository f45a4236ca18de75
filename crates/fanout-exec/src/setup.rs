use std::{sync::Arc, time::Duration};

use fanout_core::{BuildEnvironment, BuildHooks, TimeoutPolicy};
use fanout_model::RequestedTasks;
use tracing::{debug, instrument};

use crate::{action::DiagnosticAction, error::ExecError, monitor::DiagnosticMonitor};

/// Arm the timeout monitor on CI and cancel it when the build finishes.
///
/// Returns the armed timeout, or `None` outside CI.
#[instrument(level = "debug", skip_all, fields(ci = env.is_ci_server()))]
pub fn setup_timeout_monitor(
    env: &BuildEnvironment,
    policy: &TimeoutPolicy,
    requested: &RequestedTasks,
    action: Arc<dyn DiagnosticAction>,
    hooks: &mut BuildHooks,
) -> Result<Option<Duration>, ExecError> {
    let Some(timeout) = policy.for_environment(requested, env) else {
        debug!(target: "fanout.exec.monitor", "not running on CI; timeout monitor disabled");
        return Ok(None);
    };

    let handle = DiagnosticMonitor::new(action).arm(timeout)?;
    hooks.on_build_finished("timeout-monitor", move |outcome| {
        let state = handle.cancel();
        debug!(
            target: "fanout.exec.monitor",
            outcome = outcome.label(),
            ?state,
            "timeout monitor released"
        );
    });
    Ok(Some(timeout))
}
