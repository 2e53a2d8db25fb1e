//! Infrastructure adapters for stackforge.
//!
//! This crate implements the ports defined in `stackforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod collector;
pub mod filesystem;
pub mod installer;
pub mod template_store;

// Re-export commonly used adapters
pub use collector::MemoryCollector;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::{CommandInstaller, RecordingInstaller};
pub use template_store::{LocalTemplateStore, MemoryTemplateStore};
