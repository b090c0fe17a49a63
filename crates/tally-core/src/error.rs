use crate::types::EntityKind;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A lifecycle event referenced an entity that was never created.
    ///
    /// This means the event source delivered events out of order or for an
    /// unknown ID. The projection must halt.
    #[error("Missing required entity: {kind} '{key}'")]
    MissingEntity { kind: EntityKind, key: String },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Event decoding error: {0}")]
    EventDecode(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl TallyError {
    pub fn missing(kind: EntityKind, key: impl Into<String>) -> Self {
        TallyError::MissingEntity {
            kind,
            key: key.into(),
        }
    }

    /// Whether this error was caused by an ordering violation upstream
    pub fn is_missing_entity(&self) -> bool {
        matches!(self, TallyError::MissingEntity { .. })
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
