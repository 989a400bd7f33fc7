// src/error.rs
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Coarse classification used on the diagnostic channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedInput,
    StorageUnavailable,
    MissingElement,
    Io,
    Config,
}

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Not an object (got {0})")]
    NotAnObject(&'static str),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("#{0} not found")]
    MissingElement(String),

    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl PlaygroundError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaygroundError::NotAnObject(_) | PlaygroundError::Json(_) => ErrorKind::MalformedInput,
            PlaygroundError::Storage(_) | PlaygroundError::Sqlite(_) => ErrorKind::StorageUnavailable,
            PlaygroundError::MissingElement(_) => ErrorKind::MissingElement,
            PlaygroundError::Io { .. } => ErrorKind::Io,
            PlaygroundError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlaygroundError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for PlaygroundError {
    fn from(err: figment::Error) -> Self {
        PlaygroundError::Config(Box::new(err))
    }
}

impl<T> From<std::sync::PoisonError<T>> for PlaygroundError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        PlaygroundError::Storage(format!("lock poisoned: {}", err))
    }
}
