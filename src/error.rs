//! Error types for the PDI engine

use thiserror::Error;
use uuid::Uuid;

/// Main engine error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template {0} not found")]
    TemplateNotFound(Uuid),

    #[error("Inspection {0} not found")]
    InspectionNotFound(Uuid),

    #[error("Inspection item {0} not found")]
    ItemNotFound(Uuid),

    #[error("Defect {0} not found")]
    DefectNotFound(Uuid),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Integration error: {0}")]
    Integration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used for user-facing feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    Validation,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::TemplateNotFound(_)
            | AppError::InspectionNotFound(_)
            | AppError::ItemNotFound(_)
            | AppError::DefectNotFound(_) => ErrorKind::NotFound,
            AppError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Integration(_)
            | AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;
