// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be collected and reported later)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (fatal: the stack selection itself is invalid)
    // ========================================================================
    #[error("unknown provider '{id}'")]
    UnknownProvider { id: String },

    #[error(
        "provider '{provider}' does not support framework '{framework}'. Supported frameworks: {supported}"
    )]
    UnsupportedFramework {
        provider: String,
        framework: String,
        /// Comma-joined, in registry declaration order.
        supported: String,
    },

    // ========================================================================
    // Validation Errors (malformed input before it reaches the registry)
    // ========================================================================
    #[error("unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    #[error("Invalid project configuration: {0}")]
    InvalidProject(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownProvider { id } => vec![
                format!("'{}' is not a registered provider", id),
                "Try: stackforge list to see available providers".into(),
            ],
            Self::UnsupportedFramework {
                provider,
                supported,
                ..
            } => vec![
                format!("{} can be used with: {}", provider, supported),
                "Pick a different framework or provider".into(),
            ],
            Self::UnknownValue { field, value } => vec![
                format!("'{}' is not a recognised {}", value, field),
                "Use --help to see accepted values".into(),
            ],
            Self::InvalidProject(msg) => vec![
                "Check your project settings".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownProvider { .. } | Self::UnsupportedFramework { .. } => {
                ErrorCategory::Configuration
            }
            Self::UnknownValue { .. }
            | Self::InvalidProject(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
        }
    }

    /// Whether this is one of the fatal stack-configuration errors.
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
