//! Application layer for stackforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService and its helpers)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! stack rules itself. All of those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CancellationToken, FileMergeEngine, GenerationReport, GenerationService, GenerationState,
    GenerationWarning, InstallPlan, InstallationOrchestrator, ProviderInfo, TemplateLocation,
    TemplateResolver, list_providers, uses_raw_sql_setup,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ErrorCollector, Filesystem, InstallOptions, PackageInstaller, TemplateStore};

pub use error::ApplicationError;
