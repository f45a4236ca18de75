use std::{future::Future, process::ExitCode, sync::Arc};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use fanout_core::{
    BuildHooks, InMemoryTaskGraph, PropertyRegistry, TaskGraph, configure, is_requested,
};
use fanout_exec::{StackTraceDumper, setup_timeout_monitor};
use fanout_model::BuildOutcome;
use fanout_observe::{LoggerConfig, logger_init};

mod config;
mod invocation;

use config::FanoutConfig;
use invocation::Invocation;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // 1) Logger
    let log_cfg = LoggerConfig::from_env()?;
    logger_init(&log_cfg)?;

    // 2) Config + invocation
    let cfg = FanoutConfig::load()?;
    let inv = Invocation::parse(
        std::env::args_os()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned()),
    );
    let env = cfg.lifecycle.environment();
    info!(ci = env.is_ci_server(), tasks = inv.tasks.len(), "fanout starting");

    // 3) Configuration pass
    let mut graph = InMemoryTaskGraph::new();
    let mut props = PropertyRegistry::new();
    inv.seed(&mut props)?;
    configure(&inv.tasks, &mut graph, &mut props)?;

    for name in graph.names() {
        if is_requested(name, &inv.tasks) {
            info!(task = name, "lifecycle task requested");
        }
    }

    // 4) Timeout monitor, released when the build finishes
    let mut hooks = BuildHooks::new();
    let root = std::env::current_dir()?;
    let dumper = StackTraceDumper::new(cfg.dumper(&root));
    if let Some(timeout) = setup_timeout_monitor(
        &env,
        &cfg.lifecycle.timeout,
        &inv.tasks,
        Arc::new(dumper),
        &mut hooks,
    )? {
        info!(timeout_secs = timeout.as_secs(), "timeout monitor armed");
    }

    // 5) Build
    let Some(command) = inv.command else {
        for (name, value) in props.iter() {
            println!("{name}={value}");
        }
        hooks.build_finished(BuildOutcome::Success);
        return Ok(ExitCode::SUCCESS);
    };

    let (outcome, code) = run_build(&command, &props, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;
    hooks.build_finished(outcome);
    Ok(ExitCode::from(code))
}

/// Run the build command with global properties exported as environment variables.
///
/// The build is killed and reported as cancelled once `shutdown` resolves.
async fn run_build(
    command: &[String],
    props: &PropertyRegistry,
    shutdown: impl Future<Output = ()>,
) -> (BuildOutcome, u8) {
    let Some((program, args)) = command.split_first() else {
        return (BuildOutcome::Success, 0);
    };

    let mut cmd = Command::new(program);
    cmd.args(args);
    for (name, value) in props.iter() {
        cmd.env(format!("FANOUT_PROP_{name}"), value.to_string());
    }

    debug!(%program, ?args, "spawn build");
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(%program, error = %e, "failed to start build");
            return (BuildOutcome::Failure(format!("spawn: {e}")), 127);
        }
    };

    tokio::select! {
        status = child.wait() => match status {
            Ok(status) if status.success() => (BuildOutcome::Success, 0),
            Ok(status) => {
                let code = status.code().and_then(|c| u8::try_from(c).ok()).unwrap_or(1);
                warn!(code, "build failed");
                (BuildOutcome::Failure(format!("exit code: {code}")), code)
            }
            Err(e) => {
                error!(error = %e, "waiting for build failed");
                (BuildOutcome::Failure(format!("wait: {e}")), 1)
            }
        },
        _ = shutdown => {
            warn!("interrupted; stopping build");
            let _ = child.kill().await;
            (BuildOutcome::Cancelled, 130)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    async fn run(parts: &[&str], props: &PropertyRegistry) -> (BuildOutcome, u8) {
        run_build(&cmd(parts), props, std::future::pending()).await
    }

    #[tokio::test]
    async fn successful_build() {
        let (outcome, code) = run(&["true"], &PropertyRegistry::new()).await;
        assert_eq!(outcome, BuildOutcome::Success);
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn failing_build_keeps_exit_code() {
        let (outcome, code) = run(&["sh", "-c", "exit 3"], &PropertyRegistry::new()).await;
        assert!(matches!(outcome, BuildOutcome::Failure(_)));
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn properties_are_exported() {
        let mut props = PropertyRegistry::new();
        props.set("testVersions", "all").unwrap();
        let script = r#"test "$FANOUT_PROP_testVersions" = all"#;
        let (outcome, _) = run(&["sh", "-c", script], &props).await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn missing_program_is_failure() {
        let (outcome, code) = run(&["/nonexistent/fanout-build"], &PropertyRegistry::new()).await;
        assert!(matches!(outcome, BuildOutcome::Failure(_)));
        assert_eq!(code, 127);
    }

    #[tokio::test]
    async fn shutdown_kills_build_as_cancelled() {
        let started = std::time::Instant::now();
        let (outcome, code) = run_build(
            &cmd(&["sleep", "30"]),
            &PropertyRegistry::new(),
            std::future::ready(()),
        )
        .await;
        assert_eq!(outcome, BuildOutcome::Cancelled);
        assert_eq!(code, 130);
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
