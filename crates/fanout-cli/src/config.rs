use std::path::Path;

use anyhow::Context;
use fanout_core::LifecycleConfig;
use fanout_exec::DumperConfig;
use serde::Deserialize;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "FANOUT_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FanoutConfig {
    #[serde(flatten)]
    pub lifecycle: LifecycleConfig,
    /// Explicit dumper command; resolved from the environment when absent.
    pub dumper: Option<DumperConfig>,
}

impl FanoutConfig {
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn dumper(&self, root: &Path) -> DumperConfig {
        self.dumper
            .clone()
            .unwrap_or_else(|| DumperConfig::from_env(root))
    }
}
