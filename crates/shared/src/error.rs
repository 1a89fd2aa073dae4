use strum::{AsRefStr, Display};

use crate::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Unauthorized,
    NotFound,
    Server,
}

/// Failure reported by the remote data collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("session expired")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(EntityId),

    #[error("{0}")]
    Server(String),
}

impl RemoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Server(_) => ErrorKind::Server,
        }
    }

    /// Session expiry is recognised by kind only, never by message text.
    pub fn is_session_expired(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}
