//! Core domain layer for stackforge.
//!
//! Pure stack logic: the provider registry, compatibility rules, context
//! derivation, layout classification and merge rules. No filesystem, no
//! process spawning, no logging. I/O happens behind the ports defined in
//! `crate::application`.

pub mod context;
pub mod error;
pub mod layout;
pub mod merge;
pub mod project;
pub mod providers;
pub mod validation;
pub mod value_objects;

pub use context::{GenerationContext, database_url};
pub use error::{DomainError, ErrorCategory};
pub use layout::{Layout, classify_layout};
pub use merge::{MergeFailure, MergeOutcome, MergeTarget};
pub use project::{ProjectConfig, ProjectConfigBuilder};
pub use providers::{AuthProvider, PROVIDER_REGISTRY, PackageBucket, ProviderDef};
pub use validation::{CompatibilityValidator, PrerequisiteUnmet, Validated};
pub use value_objects::{
    Backend, Database, Framework, Orm, PackageManager, SessionStrategy, SqlDialect, Styling,
};
