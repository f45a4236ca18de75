use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("task path is empty")]
    EmptyTaskPath,
    #[error("task path '{0}' has an empty segment")]
    EmptySegment(String),
    #[error("task name is empty")]
    EmptyTaskName,
}
