//! Lifecycle tasks used to fan a CI build out into several builds.
//!
//! The tasks are plain data: each [`TaskDef`] row is turned into a [`LifecycleTask`] and handed to the [`TaskGraph`].

use fanout_model::{LifecycleTask, RequestedTasks, TaskGroup, TaskPath};
use tracing::{debug, info, instrument};

use crate::{
    error::CoreError, graph::TaskGraph, property::PropertyRegistry, state::setup_global_state,
};

/// Task names the lifecycle logic reacts to.
pub mod names {
    pub const COMPILE_ALL_BUILD: &str = "compileAllBuild";
    pub const SANITY_CHECK: &str = "sanityCheck";
    pub const QUICK_TEST: &str = "quickTest";
    pub const PLATFORM_TEST: &str = "platformTest";
    pub const ALL_VERSIONS_CROSS_VERSION_TEST: &str = "allVersionsCrossVersionTest";
    pub const ALL_VERSIONS_INTEG_MULTI_VERSION_TEST: &str = "allVersionsIntegMultiVersionTest";
    pub const SOAK_TEST: &str = "soakTest";
    pub const PACKAGE_BUILD: &str = "packageBuild";
}

/// Static description of a lifecycle task.
#[derive(Debug, Clone)]
pub struct TaskDef {
    pub name: &'static str,
    pub description: &'static str,
    pub group: TaskGroup,
    pub depends_on: &'static [&'static str],
}

/// Tasks run first in a pipeline to get feedback early.
pub static EARLY_FEEDBACK_TASKS: &[TaskDef] = &[
    TaskDef {
        name: names::COMPILE_ALL_BUILD,
        description: "Initialize CI Pipeline by priming the cache before fanning out",
        group: TaskGroup::CiLifecycle,
        depends_on: &[":base-services:createBuildReceipt"],
    },
    TaskDef {
        name: names::SANITY_CHECK,
        description: "Run all basic checks (without tests) - to be run locally and on CI for early feedback",
        group: TaskGroup::Verification,
        depends_on: &[
            ":docs:checkstyleApi",
            ":internal-build-reports:allIncubationReportsZip",
            ":architecture-test:checkBinaryCompatibility",
            ":docs:javadocAll",
            ":architecture-test:test",
            ":tooling-api:toolingApiShadedJar",
        ],
    },
];

/// Tasks called by the promotion build.
pub static PROMOTION_TASKS: &[TaskDef] = &[TaskDef {
    name: names::PACKAGE_BUILD,
    description: "Build production distros and smoke test them",
    group: TaskGroup::Build,
    depends_on: &[
        ":distributions-full:verifyIsProductionBuildEnvironment",
        ":distributions-full:buildDists",
        ":distributions-integ-tests:forkingIntegTest",
        ":docs:releaseNotes",
        ":docs:incubationReport",
        ":docs:checkDeadInternalLinks",
    ],
}];

impl TaskDef {
    /// Build the task this row describes.
    pub fn to_task(&self) -> Result<LifecycleTask, CoreError> {
        let deps = self
            .depends_on
            .iter()
            .map(|d| TaskPath::parse(d))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LifecycleTask::new(
            self.name,
            self.description,
            self.group.clone(),
            deps,
        )?)
    }
}

/// Register one task row into `graph`.
pub fn register_task(graph: &mut dyn TaskGraph, def: &TaskDef) -> Result<(), CoreError> {
    let task = def.to_task()?;
    debug!(
        target: "fanout.core.lifecycle",
        name = def.name,
        group = %def.group,
        deps = def.depends_on.len(),
        "registering lifecycle task"
    );
    graph.register(task)
}

/// Register promotion tasks, then early-feedback tasks.
///
/// Returns the number of tasks registered.
pub fn register_lifecycle_tasks(graph: &mut dyn TaskGraph) -> Result<usize, CoreError> {
    let mut count = 0;
    for def in PROMOTION_TASKS.iter().chain(EARLY_FEEDBACK_TASKS) {
        register_task(graph, def)?;
        count += 1;
    }
    Ok(count)
}

/// Configuration pass: register lifecycle tasks and derive global properties from the request.
#[instrument(level = "debug", skip_all, fields(requested = requested.len()))]
pub fn configure(
    requested: &RequestedTasks,
    graph: &mut dyn TaskGraph,
    props: &mut PropertyRegistry,
) -> Result<(), CoreError> {
    setup_global_state(requested, props)?;
    let count = register_lifecycle_tasks(graph)?;
    info!(
        target: "fanout.core.lifecycle",
        tasks = count,
        properties = props.len(),
        "lifecycle configured"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryTaskGraph;

    fn deps(graph: &InMemoryTaskGraph, name: &str) -> Vec<String> {
        graph
            .get(name)
            .unwrap()
            .depends_on()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn sanity_check_has_six_fixed_dependencies() {
        let mut g = InMemoryTaskGraph::new();
        register_lifecycle_tasks(&mut g).unwrap();

        assert_eq!(
            deps(&g, "sanityCheck"),
            vec![
                ":docs:checkstyleApi",
                ":internal-build-reports:allIncubationReportsZip",
                ":architecture-test:checkBinaryCompatibility",
                ":docs:javadocAll",
                ":architecture-test:test",
                ":tooling-api:toolingApiShadedJar",
            ]
        );
        assert_eq!(g.get("sanityCheck").unwrap().group(), &TaskGroup::Verification);
    }

    #[test]
    fn compile_all_build_primes_cache() {
        let mut g = InMemoryTaskGraph::new();
        register_lifecycle_tasks(&mut g).unwrap();

        let t = g.get("compileAllBuild").unwrap();
        assert_eq!(t.group().as_str(), "CI Lifecycle");
        assert_eq!(deps(&g, "compileAllBuild"), vec![":base-services:createBuildReceipt"]);
    }

    #[test]
    fn package_build_dependencies() {
        let mut g = InMemoryTaskGraph::new();
        register_lifecycle_tasks(&mut g).unwrap();

        let d = deps(&g, "packageBuild");
        assert_eq!(d.len(), 6);
        assert!(d.contains(&":distributions-full:buildDists".to_string()));
        assert!(d.contains(&":docs:checkDeadInternalLinks".to_string()));
        assert_eq!(g.get("packageBuild").unwrap().group(), &TaskGroup::Build);
    }

    #[test]
    fn registration_order_and_count() {
        let mut g = InMemoryTaskGraph::new();
        assert_eq!(register_lifecycle_tasks(&mut g).unwrap(), 3);
        assert_eq!(g.names(), vec!["packageBuild", "compileAllBuild", "sanityCheck"]);
    }

    #[test]
    fn second_pass_reports_duplicate() {
        let mut g = InMemoryTaskGraph::new();
        register_lifecycle_tasks(&mut g).unwrap();
        let err = register_lifecycle_tasks(&mut g).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTask(ref n) if n == "packageBuild"));
    }

    #[test]
    fn bad_dependency_path_is_invalid_task() {
        let def = TaskDef {
            name: "broken",
            description: "",
            group: TaskGroup::Custom("misc".into()),
            depends_on: &[":docs::oops"],
        };
        let mut g = InMemoryTaskGraph::new();
        let err = register_task(&mut g, &def).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTask(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn configure_sets_properties_and_tasks() {
        let mut g = InMemoryTaskGraph::new();
        let mut props = PropertyRegistry::new();
        let req: RequestedTasks = ["platformTest"].into_iter().collect();

        configure(&req, &mut g, &mut props).unwrap();

        assert_eq!(g.len(), 3);
        assert_eq!(props.get("testVersions").unwrap().to_string(), "partial");
    }
}
