//! Application layer errors.
//!
//! These errors represent failures in orchestration, not stack rules.
//! Stack rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The package manager exited unsuccessfully or could not be spawned.
    #[error("{package_manager} install failed: {reason}")]
    Install {
        package_manager: String,
        reason: String,
    },

    /// A generated block could not be merged into an existing file.
    #[error("Could not merge into {path}: {reason}")]
    Merge { path: PathBuf, reason: String },

    /// Reading or copying a template failed.
    #[error("Template error at {path}: {reason}")]
    TemplateIo { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// The caller cancelled the run.
    #[error("Generation cancelled while {state}")]
    Cancelled { state: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Install {
                package_manager, ..
            } => vec![
                format!("Check that '{}' is installed and on your PATH", package_manager),
                "Re-run with --skip-install and install the packages yourself".into(),
            ],
            Self::Merge { path, .. } => vec![
                format!("Inspect {} for syntax errors", path.display()),
                "Fix the file and re-run; merges are idempotent".into(),
            ],
            Self::TemplateIo { path, .. } => vec![
                format!("Template path: {}", path.display()),
                "Check --templates or templates.root in your config".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::Cancelled { .. } => vec![
                "Files written before cancellation were kept".into(),
                "Re-run to finish; completed steps are skipped".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Install { .. } => ErrorCategory::External,
            Self::TemplateIo { .. } => ErrorCategory::NotFound,
            Self::Merge { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
            Self::Cancelled { .. } => ErrorCategory::Internal,
        }
    }
}
