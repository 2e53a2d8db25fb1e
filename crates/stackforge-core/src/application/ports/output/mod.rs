//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{GenerationContext, PackageManager};
use crate::error::{StackforgeError, StackforgeResult};

/// Port for filesystem operations on the generated project.
///
/// Implemented by:
/// - `stackforge_adapters::filesystem::LocalFilesystem` (production)
/// - `stackforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StackforgeResult<String>;

    /// Write content to a file, replacing it. Parent directories are created.
    fn write_file(&self, path: &Path, content: &str) -> StackforgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackforgeResult<()>;
}

/// Port for template discovery and copying.
///
/// Implemented by:
/// - `stackforge_adapters::template_store::LocalTemplateStore` (a directory tree)
/// - `stackforge_adapters::template_store::MemoryTemplateStore` (testing)
///
/// Rendering is `{{KEY}}` substitution of file contents through
/// [`GenerationContext::render`].
pub trait TemplateStore: Send + Sync {
    /// Names of the immediate subdirectories of `path`, sorted.
    fn list_subdirectories(&self, path: &Path) -> StackforgeResult<Vec<String>>;

    /// Every file below `path`, relative to it, sorted.
    fn list_files(&self, path: &Path) -> StackforgeResult<Vec<PathBuf>>;

    /// Check if a template path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Render every file under `src` into `dest`, keeping relative paths.
    ///
    /// Returns the destination paths written, in a stable order.
    fn render_and_copy_tree(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<Vec<PathBuf>>;

    /// Render a single template file to `dest`.
    fn render_and_copy_file(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<()>;
}

/// Options for one package-manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub package_manager: PackageManager,
    /// Directory the package manager runs in.
    pub project_path: PathBuf,
    /// Install as development dependencies.
    pub dev: bool,
}

/// Port for the project's package manager.
///
/// Implemented by:
/// - `stackforge_adapters::installer::CommandInstaller` (spawns npm/pnpm/yarn/bun)
/// - `stackforge_adapters::installer::RecordingInstaller` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Install `packages` and succeed only on a zero exit status.
    fn install(&self, packages: &[String], options: &InstallOptions) -> StackforgeResult<()>;
}

/// Sink for errors the orchestrator recovers from.
///
/// Implemented by:
/// - `stackforge_adapters::collector::MemoryCollector`
pub trait ErrorCollector: Send + Sync {
    /// Record `error`, which happened while doing `context`.
    fn collect(&self, context: &str, error: &StackforgeError);
}
