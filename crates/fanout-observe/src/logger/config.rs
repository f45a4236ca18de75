use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

/// Environment variable holding the log filter (e.g. `info,fanout.exec=debug`).
pub const LEVEL_ENV: &str = "FANOUT_LOG";
/// Environment variable holding the output format (`text`, `json`, `journald`).
pub const FORMAT_ENV: &str = "FANOUT_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by `FANOUT_LOG` and `FANOUT_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(level) = lookup(LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            cfg.level = level;
        }
        if let Some(format) = lookup(FORMAT_ENV) {
            cfg.format = format.parse()?;
        }
        if cfg.format == LoggerFormat::Json {
            cfg.use_color = false;
        }
        Ok(cfg)
    }
}
