use fanout_model::RequestedTasks;

/// Returns `true` if `task_name` was requested on the command line.
///
/// Matches the name verbatim or any qualified reference ending in `:<task_name>` (e.g. `:docs:sanityCheck`).
/// Matching is case-sensitive; no abbreviation or wildcard expansion is done.
pub fn is_requested(task_name: &str, requested: &RequestedTasks) -> bool {
    let qualified = format!(":{task_name}");
    requested
        .iter()
        .any(|t| t == task_name || t.ends_with(&qualified))
}

/// Returns `true` if at least one of `names` was requested.
pub fn is_any_requested<'a, I>(names: I, requested: &RequestedTasks) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().any(|n| is_requested(n, requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(tasks: &[&str]) -> RequestedTasks {
        tasks.iter().copied().collect()
    }

    #[test]
    fn exact_match() {
        assert!(is_requested("sanityCheck", &req(&["clean", "sanityCheck"])));
    }

    #[test]
    fn qualified_match() {
        assert!(is_requested("quickTest", &req(&[":core:quickTest"])));
        assert!(is_requested("quickTest", &req(&[":quickTest"])));
    }

    #[test]
    fn suffix_must_follow_colon() {
        assert!(!is_requested("Test", &req(&["quickTest"])));
        assert!(!is_requested("Test", &req(&[":core:quickTest"])));
    }

    #[test]
    fn qualified_reference_must_end_with_name() {
        assert!(!is_requested("soakTest", &req(&[":soakTest:extra"])));
        assert!(!is_requested("soakTest", &req(&["soakTestFoo"])));
    }

    #[test]
    fn case_sensitive() {
        assert!(!is_requested("sanityCheck", &req(&["SanityCheck"])));
        assert!(!is_requested("sanityCheck", &req(&[":docs:sanitycheck"])));
    }

    #[test]
    fn empty_request() {
        assert!(!is_requested("sanityCheck", &RequestedTasks::new()));
    }

    #[test]
    fn any_of_set() {
        let r = req(&[":platform:soakTest"]);
        assert!(is_any_requested(["allVersionsCrossVersionTest", "soakTest"], &r));
        assert!(!is_any_requested(["platformTest", "quickTest"], &r));
        assert!(!is_any_requested(std::iter::empty::<&str>(), &r));
    }
}
