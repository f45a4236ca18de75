use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    env::{BuildEnvironment, CI_ENV_VAR},
    error::CoreError,
    timeout::TimeoutPolicy,
};

/// Configuration of the lifecycle orchestration.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifecycleConfig {
    /// Environment variable whose presence marks a CI server.
    pub ci_env_var: String,
    pub timeout: TimeoutPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            ci_env_var: CI_ENV_VAR.to_string(),
            timeout: TimeoutPolicy::default(),
        }
    }
}

impl LifecycleConfig {
    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        debug!(target: "fanout.core.config", path = %path.display(), "loading lifecycle config");
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Detect the build environment using the configured marker variable.
    pub fn environment(&self) -> BuildEnvironment {
        BuildEnvironment::detect_with(&self.ci_env_var)
    }
}
