use mealplanner_shared::{EntityId, RemoteError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Fixture {path}: {source}")]
    FixtureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unknown id: {0}")]
    UnknownId(EntityId),

    #[error("Remote error: {0}")]
    RemoteError(#[from] RemoteError),
}

impl AppError {
    /// Process exit code for the command line.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError(_) | AppError::ValidationError(_) => 2,
            AppError::RemoteError(e) if e.is_session_expired() => 3,
            _ => 1,
        }
    }
}
