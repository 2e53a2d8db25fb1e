//! Application services (use case orchestration).

pub mod generation_service;
pub mod installer;
pub mod merge_service;
pub mod template_resolver;

pub use generation_service::{
    CancellationToken, GenerationReport, GenerationService, GenerationState, GenerationWarning,
    ProviderInfo, list_providers, uses_raw_sql_setup,
};
pub use installer::{InstallPlan, InstallationOrchestrator};
pub use merge_service::FileMergeEngine;
pub use template_resolver::{TemplateLocation, TemplateResolver};
