//! Compatibility validation of a stack selection against the registry.
//!
//! Two outcomes are errors (unknown provider, unsupported framework) and
//! abort the run. A provider that needs a database on a stack without one is
//! *not* an error: the feature is skipped and the caller carries on.

use crate::domain::{
    error::DomainError,
    project::ProjectConfig,
    providers::{self, ProviderDef},
};

/// A prerequisite the stack does not meet. Reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteUnmet {
    pub provider: &'static str,
    pub reason: String,
}

/// Result of a successful validation.
#[derive(Debug, Clone)]
pub enum Validated {
    /// Generation may continue with this provider.
    Proceed(&'static ProviderDef),
    /// The feature does not apply to this stack.
    Skip(PrerequisiteUnmet),
}

impl Validated {
    pub fn provider(&self) -> Option<&'static ProviderDef> {
        match self {
            Self::Proceed(def) => Some(def),
            Self::Skip(_) => None,
        }
    }
}

/// Centralized compatibility validation.
pub struct CompatibilityValidator;

impl CompatibilityValidator {
    /// Validate `config` against its requested provider.
    ///
    /// # Errors
    ///
    /// - `UnknownProvider` naming the literal id
    /// - `UnsupportedFramework` listing the supported frameworks in
    ///   declaration order, joined with `", "`
    pub fn validate(config: &ProjectConfig) -> Result<Validated, DomainError> {
        let provider = providers::lookup(config.auth_provider())?;

        if !provider.supports(config.framework()) {
            return Err(DomainError::UnsupportedFramework {
                provider: provider.id.to_string(),
                framework: config.framework().to_string(),
                supported: provider.supported_list(),
            });
        }

        if provider.requires_database && config.database().is_none() {
            return Ok(Validated::Skip(PrerequisiteUnmet {
                provider: provider.id.as_str(),
                reason: format!(
                    "{} requires a database, but the project has none",
                    provider.display_name
                ),
            }));
        }

        Ok(Validated::Proceed(provider))
    }
}
