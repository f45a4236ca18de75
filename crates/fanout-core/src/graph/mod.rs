use std::collections::HashMap;

use fanout_model::LifecycleTask;
use tracing::trace;

use crate::error::CoreError;

/// Task-graph engine that lifecycle tasks are registered into.
///
/// Implementations own uniqueness of task names and must reject a second registration of the same name with [`CoreError::DuplicateTask`].
pub trait TaskGraph {
    fn register(&mut self, task: LifecycleTask) -> Result<(), CoreError>;

    fn get(&self, name: &str) -> Option<&LifecycleTask>;

    /// Registered task names in registration order.
    fn names(&self) -> Vec<&str>;
}

/// Task graph that only records registrations.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskGraph {
    tasks: Vec<LifecycleTask>,
    by_name: HashMap<String, usize>,
}

impl InMemoryTaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskGraph for InMemoryTaskGraph {
    fn register(&mut self, task: LifecycleTask) -> Result<(), CoreError> {
        if self.by_name.contains_key(task.name()) {
            return Err(CoreError::DuplicateTask(task.name().to_string()));
        }
        trace!(target: "fanout.core.graph", name = task.name(), "task registered");
        self.by_name.insert(task.name().to_string(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&LifecycleTask> {
        self.by_name.get(name).map(|&i| &self.tasks[i])
    }

    fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(LifecycleTask::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanout_model::TaskGroup;

    fn task(name: &str) -> LifecycleTask {
        LifecycleTask::new(name, "", TaskGroup::Build, vec![]).unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut g = InMemoryTaskGraph::new();
        g.register(task("packageBuild")).unwrap();
        g.register(task("sanityCheck")).unwrap();

        assert_eq!(g.len(), 2);
        assert_eq!(g.names(), vec!["packageBuild", "sanityCheck"]);
        assert_eq!(g.get("sanityCheck").unwrap().name(), "sanityCheck");
        assert!(g.get("quickTest").is_none());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut g = InMemoryTaskGraph::new();
        g.register(task("sanityCheck")).unwrap();

        let err = g.register(task("sanityCheck")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTask(ref n) if n == "sanityCheck"));
        assert_eq!(g.len(), 1);
    }
}
