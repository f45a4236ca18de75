use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use tokio::process::Command;

pub fn cmd_program<P, S>(program: P, args: &[S]) -> Command
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}

/// Path of an executable inside a runtime home (`<home>/bin/<name>`).
pub fn runtime_executable(home: &Path, name: &str) -> PathBuf {
    cfg_if::cfg_if! {
        if #[cfg(target_family = "windows")] {
            home.join("bin").join(format!("{name}.exe"))
        } else {
            home.join("bin").join(name)
        }
    }
}

/// Hostname of the machine, for log records.
pub fn host() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
