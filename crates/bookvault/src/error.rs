use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("A record with id {0} already exists")]
    DuplicateId(String),

    #[error("Record failed validation: {0}")]
    Validation(ValidationErrors),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Structural problems that make an import file unusable.
///
/// Any of these rejects the whole file; the collection is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Root must be an array.")]
    NotAnArray,

    #[error("One or more records are missing required fields.")]
    MissingFields,

    #[error("Record id {0} appears more than once.")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
