use serde::{Deserialize, Serialize};

/// How a build ended, as reported to build-finished callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildOutcome {
    Success,
    Failure(String),
    /// The build was interrupted or its owner went away before reporting a result.
    Cancelled,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            BuildOutcome::Success => "success",
            BuildOutcome::Failure(_) => "failure",
            BuildOutcome::Cancelled => "cancelled",
        }
    }
}
