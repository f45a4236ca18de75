use fanout_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("attempting to set global property {name} to two different values ({value} vs {existing})")]
    ConflictingProperty {
        name: String,
        value: String,
        existing: String,
    },
    #[error("task '{0}' is already registered")]
    DuplicateTask(String),
    #[error("invalid task definition: {0}")]
    InvalidTask(#[from] ModelError),
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
