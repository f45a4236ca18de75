use std::fmt;

use serde::{Deserialize, Serialize};

/// Group a lifecycle task is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskGroup {
    /// Tasks used to fan a CI pipeline out into several builds.
    CiLifecycle,
    Verification,
    Build,
    Custom(String),
}

impl TaskGroup {
    /// Display label of the group.
    pub fn as_str(&self) -> &str {
        match self {
            TaskGroup::CiLifecycle => "CI Lifecycle",
            TaskGroup::Verification => "verification",
            TaskGroup::Build => "build",
            TaskGroup::Custom(name) => name,
        }
    }
}

impl fmt::Display for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
