pub mod config;
pub use config::LifecycleConfig;
pub mod env;
pub use env::BuildEnvironment;
pub mod error;
pub use error::CoreError;
pub mod graph;
pub use graph::{InMemoryTaskGraph, TaskGraph};
pub mod hooks;
pub use hooks::BuildHooks;
pub mod lifecycle;
pub use lifecycle::{TaskDef, configure, register_lifecycle_tasks, register_task};
pub mod matcher;
pub use matcher::{is_any_requested, is_requested};
pub mod property;
pub use property::PropertyRegistry;
pub mod state;
pub use state::setup_global_state;
pub mod timeout;
pub use timeout::TimeoutPolicy;
