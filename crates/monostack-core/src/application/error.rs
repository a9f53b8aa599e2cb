//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the port
//! boundaries, not business logic. Only the variants the run cannot
//! survive — missing or malformed catalog resources, an uncreatable root —
//! ever unwind to the caller; everything module-local is converted to a
//! boolean in the generation report at its own boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The install-command catalog resource does not exist.
    #[error("Catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// The catalog exists but cannot be parsed into the expected shape.
    #[error("Malformed catalog: {reason}")]
    MalformedCatalog { reason: String },

    /// The compose template resource does not exist.
    #[error("Compose template not found at {path}")]
    TemplateNotFound { path: PathBuf },

    /// The compose template exists but cannot be read.
    #[error("Malformed compose template: {reason}")]
    MalformedTemplate { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be started at all.
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// An external command exceeded its time limit and was killed.
    #[error("Command '{command}' timed out after {seconds}s")]
    CommandTimedOut { command: String, seconds: u64 },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CatalogNotFound { path } => vec![
                format!("Expected a catalog file at: {}", path.display()),
                "Point `catalog.commands_path` in your config at a valid file".into(),
                "Or remove the override to use the built-in catalog".into(),
            ],
            Self::MalformedCatalog { reason } => vec![
                format!("The catalog could not be parsed: {}", reason),
                "The catalog must map module -> language -> framework -> command".into(),
            ],
            Self::TemplateNotFound { path } => vec![
                format!("Expected a compose template at: {}", path.display()),
                "Point `catalog.compose_template_path` in your config at a valid file".into(),
            ],
            Self::MalformedTemplate { reason } => {
                vec![format!("The compose template could not be read: {}", reason)]
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommandSpawnFailed { command, .. } => vec![
                format!("Could not start: {}", command),
                "Ensure a POSIX shell is available on PATH".into(),
            ],
            Self::CommandTimedOut { command, seconds } => vec![
                format!("'{}' ran longer than {}s and was killed", command, seconds),
                "Raise `install.timeout_secs` in your config, or remove it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogNotFound { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::MalformedCatalog { .. } | Self::MalformedTemplate { .. } => {
                ErrorCategory::Configuration
            }
            Self::FilesystemError { .. }
            | Self::CommandSpawnFailed { .. }
            | Self::CommandTimedOut { .. } => ErrorCategory::Internal,
        }
    }
}
