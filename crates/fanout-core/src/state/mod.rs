use fanout_model::RequestedTasks;
use tracing::instrument;

use crate::{
    error::CoreError,
    lifecycle::names,
    matcher::{is_any_requested, is_requested},
    property::PropertyRegistry,
};

/// Global property selecting which test-version matrix downstream builds run.
pub const TEST_VERSIONS: &str = "testVersions";

pub const TEST_VERSIONS_PARTIAL: &str = "partial";
pub const TEST_VERSIONS_ALL: &str = "all";

/// Tasks that run against every supported version.
pub const ALL_VERSIONS_TASKS: &[&str] = &[
    names::ALL_VERSIONS_CROSS_VERSION_TEST,
    names::ALL_VERSIONS_INTEG_MULTI_VERSION_TEST,
    names::SOAK_TEST,
];

/// Stamp global properties implied by the requested tasks.
///
/// Requesting both a partial and an all-versions task is a conflict.
#[instrument(level = "debug", skip_all)]
pub fn setup_global_state(
    requested: &RequestedTasks,
    props: &mut PropertyRegistry,
) -> Result<(), CoreError> {
    if needs_partial_test_versions(requested) {
        props.set(TEST_VERSIONS, TEST_VERSIONS_PARTIAL)?;
    }
    if needs_all_test_versions(requested) {
        props.set(TEST_VERSIONS, TEST_VERSIONS_ALL)?;
    }
    Ok(())
}

fn needs_partial_test_versions(requested: &RequestedTasks) -> bool {
    is_requested(names::PLATFORM_TEST, requested)
}

fn needs_all_test_versions(requested: &RequestedTasks) -> bool {
    is_any_requested(ALL_VERSIONS_TASKS.iter().copied(), requested)
}
