use std::path::PathBuf;

use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum NotekeepError {
    #[error("Source root not found: {}", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("No note ids left: the collection already uses id {}", u64::MAX)]
    IdsExhausted,

    #[error("Note text is empty")]
    EmptyText,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Llm(#[from] LlmError),
}

pub type Result<T> = std::result::Result<T, NotekeepError>;
