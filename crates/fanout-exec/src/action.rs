use async_trait::async_trait;

use crate::error::ExecError;

/// Work run by a [`DiagnosticMonitor`](crate::DiagnosticMonitor) when its timeout elapses.
///
/// Errors are logged by the monitor and never propagated to the build.
#[async_trait]
pub trait DiagnosticAction: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<(), ExecError>;
}
