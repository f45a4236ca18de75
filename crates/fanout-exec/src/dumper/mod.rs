//! Stack-trace dumper run when a CI build hangs.
//!
//! The dumper launches `<runtime> <script> [args..]`, where the script prints the stack traces of every process of that runtime on the machine.
//! Output goes straight to the build log.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    action::DiagnosticAction,
    error::ExecError,
    util::{cmd_program, runtime_executable},
};

/// Environment variable naming the runtime home (`<home>/bin/java`).
pub const RUNTIME_HOME_ENV: &str = "JAVA_HOME";
/// Environment variable overriding the dumper script path.
pub const SCRIPT_ENV: &str = "FANOUT_DIAGNOSTIC_SCRIPT";
/// Dumper script, relative to the root project.
pub const DEFAULT_SCRIPT: &str = "subprojects/internal-integ-testing/src/main/groovy/org/gradle/integtests/fixtures/timeout/JavaProcessStackTracesMonitor.java";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumperConfig {
    /// Runtime executable that runs the script.
    pub runtime: PathBuf,
    pub script: PathBuf,
    /// Extra arguments after the script path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl DumperConfig {
    pub fn new(runtime: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            runtime: runtime.into(),
            script: script.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Use `<java_home>/bin/java` as the runtime.
    pub fn from_java_home(java_home: impl AsRef<Path>, script: impl Into<PathBuf>) -> Self {
        Self::new(runtime_executable(java_home.as_ref(), "java"), script)
    }

    /// Resolve from `JAVA_HOME` and `FANOUT_DIAGNOSTIC_SCRIPT`.
    ///
    /// Without `JAVA_HOME` the runtime is looked up on `PATH`.
    /// Without a script override the script is [`DEFAULT_SCRIPT`] under `root`.
    pub fn from_env(root: &Path) -> Self {
        let script = std::env::var_os(SCRIPT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(DEFAULT_SCRIPT));
        match std::env::var_os(RUNTIME_HOME_ENV) {
            Some(home) => Self::from_java_home(PathBuf::from(home), script),
            None => Self::new("java", script),
        }
    }

    fn argv(&self) -> Vec<&std::ffi::OsStr> {
        std::iter::once(self.script.as_os_str())
            .chain(self.args.iter().map(|a| std::ffi::OsStr::new(a.as_str())))
            .collect()
    }
}

/// [`DiagnosticAction`] that runs the stack-trace dumper process.
pub struct StackTraceDumper {
    cfg: DumperConfig,
}

impl StackTraceDumper {
    pub fn new(cfg: DumperConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl DiagnosticAction for StackTraceDumper {
    fn name(&self) -> &'static str {
        "stack-trace-dumper"
    }

    async fn run(&self) -> Result<(), ExecError> {
        if self.cfg.runtime.as_os_str().is_empty() {
            return Err(ExecError::MissingProgram("runtime path is empty".into()));
        }

        let argv = self.cfg.argv();
        let mut cmd = cmd_program(&self.cfg.runtime, argv.as_slice());
        if let Some(cwd) = &self.cfg.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.cfg.env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        trace!(
            target: "fanout.exec.dumper",
            runtime = %self.cfg.runtime.display(),
            script = %self.cfg.script.display(),
            "spawn"
        );
        let mut child = cmd
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("{}: {e}", self.cfg.runtime.display())))?;

        let status = child.wait().await?;
        if !status.success() {
            return match status.code() {
                Some(code) => Err(ExecError::NonZeroExit { code }),
                None => Err(ExecError::KilledBySignal),
            };
        }

        debug!(target: "fanout.exec.dumper", "stack traces dumped");
        Ok(())
    }
}
