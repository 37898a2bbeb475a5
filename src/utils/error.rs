use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: i64 },

    #[error("Department not found: '{name}'")]
    DepartmentNotFound { name: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: i64 },

    #[error("Duplicate id: {entity} '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Invalid status '{value}'. Allowed statuses: {}", allowed.join(", "))]
    InvalidStatus { value: String, allowed: Vec<String> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Coarse grouping of [`StaffingError`] for callers that recover by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Duplicate,
    IllegalState,
    InvalidStatus,
    Configuration,
    Io,
}

impl StaffingError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::EmployeeNotFound { .. }
            | Self::DepartmentNotFound { .. }
            | Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateId { .. } => ErrorCategory::Duplicate,
            Self::IllegalState { .. } => ErrorCategory::IllegalState,
            Self::InvalidStatus { .. } => ErrorCategory::InvalidStatus,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::CsvError(_)
            | Self::DatabaseError(_) => ErrorCategory::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, StaffingError>;
