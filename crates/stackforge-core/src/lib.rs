//! Stackforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the stackforge
//! feature scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         stackforge-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, resolver, merging)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, TemplateStore, Installer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stackforge-adapters (Infrastructure)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProviderDef registry, ProjectConfig,   │
//! │  GenerationContext, merge rules)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackforge_core::prelude::*;
//!
//! let config = ProjectConfig::builder("my-app", "/work/my-app")
//!     .framework(Framework::Next)
//!     .database(Database::Postgres)
//!     .auth_provider("auth.js")
//!     .build()?;
//!
//! let service = GenerationService::new(store, filesystem, installer, collector, "./templates");
//! let report = service.generate(&config)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod secrets;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancellationToken, GenerationReport, GenerationService, GenerationState, ProviderInfo,
        list_providers,
        ports::{ErrorCollector, Filesystem, InstallOptions, PackageInstaller, TemplateStore},
    };
    pub use crate::domain::{
        Backend, Database, Framework, GenerationContext, Layout, Orm, PackageManager,
        ProjectConfig, ProjectConfigBuilder, SessionStrategy, Styling,
    };
    pub use crate::error::{ErrorCategory, StackforgeError, StackforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
