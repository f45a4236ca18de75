use serde::{Deserialize, Serialize};

use crate::{ModelError, TaskGroup, TaskPath};

/// Aggregate task registered at configuration time.
///
/// A lifecycle task does no work of its own; it only pulls in its dependencies so a CI job can be keyed by one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleTask {
    name: String,
    description: String,
    group: TaskGroup,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<TaskPath>,
}

impl LifecycleTask {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        group: TaskGroup,
        depends_on: Vec<TaskPath>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyTaskName);
        }
        Ok(Self {
            name,
            description: description.into(),
            group,
            depends_on,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn group(&self) -> &TaskGroup {
        &self.group
    }

    pub fn depends_on(&self) -> &[TaskPath] {
        &self.depends_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_name() {
        let err = LifecycleTask::new("  ", "nothing", TaskGroup::Build, vec![]).unwrap_err();
        assert_eq!(err, ModelError::EmptyTaskName);
    }

    #[test]
    fn serde_shape() {
        let task = LifecycleTask::new(
            "compileAllBuild",
            "prime the cache",
            TaskGroup::CiLifecycle,
            vec![TaskPath::parse(":base-services:createBuildReceipt").unwrap()],
        )
        .unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["group"], "ciLifecycle");
        assert_eq!(json["dependsOn"][0], ":base-services:createBuildReceipt");

        let back: LifecycleTask = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
