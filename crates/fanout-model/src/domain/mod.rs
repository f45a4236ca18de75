mod requested;
pub use requested::RequestedTasks;

mod task_path;
pub use task_path::TaskPath;

mod task_group;
pub use task_group::TaskGroup;

mod lifecycle_task;
pub use lifecycle_task::LifecycleTask;

mod property_value;
pub use property_value::PropertyValue;

mod build_outcome;
pub use build_outcome::BuildOutcome;

/// Name of a process-wide build property (e.g. `"testVersions"`).
pub type PropertyName = String;

/// Timeout value in milliseconds.
///
/// Used in configuration where an explicit time limit is required.
pub type TimeoutMs = u64;
