//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations on the generated project
//!   - `TemplateStore`: Template discovery and render-and-copy
//!   - `PackageInstaller`: The project's package manager
//!   - `ErrorCollector`: Sink for recovered errors
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ErrorCollector, Filesystem, InstallOptions, PackageInstaller, TemplateStore};

#[cfg(test)]
pub use output::MockPackageInstaller;
