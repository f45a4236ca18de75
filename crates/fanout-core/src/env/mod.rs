/// Environment variable whose presence marks a CI server.
pub const CI_ENV_VAR: &str = "CI";

/// Facts about the environment the build runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildEnvironment {
    ci_server: bool,
}

impl BuildEnvironment {
    /// Detect the environment using the `CI` variable.
    pub fn detect() -> Self {
        Self::detect_with(CI_ENV_VAR)
    }

    /// Detect the environment using a custom marker variable.
    ///
    /// The variable only needs to be present; its value is ignored.
    pub fn detect_with(var: &str) -> Self {
        Self {
            ci_server: std::env::var_os(var).is_some(),
        }
    }

    pub fn ci() -> Self {
        Self { ci_server: true }
    }

    pub fn local() -> Self {
        Self { ci_server: false }
    }

    #[inline]
    pub fn is_ci_server(&self) -> bool {
        self.ci_server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_constructors() {
        assert!(BuildEnvironment::ci().is_ci_server());
        assert!(!BuildEnvironment::local().is_ci_server());
        assert_eq!(BuildEnvironment::default(), BuildEnvironment::local());
    }

    #[test]
    fn missing_marker_is_local() {
        let env = BuildEnvironment::detect_with("FANOUT_TEST_SURELY_UNSET_MARKER_VAR");
        assert!(!env.is_ci_server());
    }

    #[test]
    fn present_marker_is_ci() {
        // PATH is set in any environment the tests run in.
        let env = BuildEnvironment::detect_with("PATH");
        assert!(env.is_ci_server());
    }
}
