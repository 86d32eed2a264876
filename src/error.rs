use thiserror::Error;

#[derive(Error, Debug)]
pub enum IljiError {
    #[error("Not in an ilji project. Run 'ilji init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .ilji/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IljiError>;
