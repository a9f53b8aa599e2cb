//! Domain layer errors.
//!
//! Violations of the domain model itself. Orchestration failures are
//! `ApplicationError` from `crate::application`.

use thiserror::Error;

/// Errors raised by the pure domain layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A string did not name one of the known module kinds.
    #[error("Unknown module '{name}'")]
    UnknownModule { name: String },

    /// The compose template could not be parsed into the expected shape.
    #[error("Invalid compose template: {reason}")]
    InvalidComposeTemplate { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownModule { name } => vec![
                format!("'{}' is not a known module", name),
                "Known modules: backend, frontend-web, frontend-mobile, frontend-desktop".into(),
            ],
            Self::InvalidComposeTemplate { reason } => vec![
                format!("The compose template is not valid YAML: {}", reason),
                "Check the template for indentation or quoting mistakes".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownModule { .. } => ErrorCategory::Validation,
            Self::InvalidComposeTemplate { .. } => ErrorCategory::Validation,
        }
    }
}

/// Domain error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
