use serde::{Deserialize, Serialize};

/// Task names supplied on the invocation command line, in the order given.
///
/// The list is fixed once the invocation is parsed and never changes for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedTasks(Vec<String>);

impl RequestedTasks {
    /// Create an empty request (no task names on the command line).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over requested names in command-line order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns `true` if `name` was requested verbatim.
    ///
    /// Qualified references (`:project:name`) are not considered here.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S> FromIterator<S> for RequestedTasks
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for RequestedTasks {
    fn from(tasks: Vec<String>) -> Self {
        Self(tasks)
    }
}
