use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Reference to a task, either bare (`javadocAll`) or qualified by project path (`:docs:javadocAll`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskPath(String);

impl TaskPath {
    /// Parse a task reference.
    ///
    /// Rejects empty input and empty inner segments (`:docs::test`).
    /// A single leading `:` marks a root-relative path and is allowed.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.is_empty() || raw == ":" {
            return Err(ModelError::EmptyTaskPath);
        }
        let body = raw.strip_prefix(':').unwrap_or(raw);
        if body.split(':').any(str::is_empty) {
            return Err(ModelError::EmptySegment(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Task name: the last segment of the path.
    pub fn task(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaskPath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskPath> for String {
    fn from(path: TaskPath) -> Self {
        path.0
    }
}
