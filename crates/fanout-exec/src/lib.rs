mod error;
pub use error::ExecError;

mod util;

pub mod action;
pub use action::DiagnosticAction;

pub mod dumper;
pub use dumper::{DumperConfig, StackTraceDumper};

pub mod monitor;
pub use monitor::{DiagnosticMonitor, MonitorHandle, MonitorState};

mod setup;
pub use setup::setup_timeout_monitor;
