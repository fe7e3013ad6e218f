//! Runtime errors.

use talent_core::TalentError;

use crate::repository::RepositoryError;

/// Errors surfaced while serving player requests.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// Topic id with no registered meaning.
    #[error("unknown topic id {0}")]
    UnknownTopic(u16),

    /// Request payload did not match the expected field grammar.
    #[error("malformed request payload: {0}")]
    MalformedPayload(String),

    /// The engine rejected the transition.
    #[error(transparent)]
    Talent(#[from] TalentError),

    /// The persistence hook failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Content loading failed at startup.
    #[error("content loading failed: {0}")]
    Content(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
