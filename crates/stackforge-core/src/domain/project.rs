//! The `ProjectConfig` aggregate and its builder.
//!
//! A `ProjectConfig` is the raw stack selection for one project. It is
//! read-only once built; everything derived from it (secrets, database URL,
//! layout) is computed on demand by other domain modules.
//!
//! The provider is kept as a string on purpose: it comes from the outside
//! world and is only resolved against the registry during validation, so an
//! unknown id surfaces as a typed configuration error rather than a parse
//! failure at the edge.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    value_objects::{Backend, Database, Framework, Orm, PackageManager, Styling},
};

// ── Aggregate ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    name: String,
    path: PathBuf,
    framework: Framework,
    backend: Backend,
    database: Database,
    orm: Orm,
    styling: Styling,
    typescript: bool,
    package_manager: PackageManager,
    secure_passwords: bool,
    auth_provider: String,
    install_dependencies: bool,
}

impl ProjectConfig {
    /// Start building a config for `name` rooted at `path`.
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(name, path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub const fn framework(&self) -> Framework {
        self.framework
    }
    pub const fn backend(&self) -> Backend {
        self.backend
    }
    pub const fn database(&self) -> Database {
        self.database
    }
    pub const fn orm(&self) -> Orm {
        self.orm
    }
    pub const fn styling(&self) -> Styling {
        self.styling
    }
    pub const fn typescript(&self) -> bool {
        self.typescript
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn secure_passwords(&self) -> bool {
        self.secure_passwords
    }
    pub fn auth_provider(&self) -> &str {
        &self.auth_provider
    }
    pub const fn install_dependencies(&self) -> bool {
        self.install_dependencies
    }

    /// Monorepo when a separate backend app sits next to the frontend.
    pub const fn is_monorepo(&self) -> bool {
        self.backend.is_separate_app()
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {}",
            self.name, self.framework, self.auth_provider
        )?;
        if !self.database.is_none() {
            write!(f, ", {}", self.database)?;
        }
        if self.orm != Orm::None {
            write!(f, "/{}", self.orm)?;
        }
        if self.backend.is_separate_app() {
            write!(f, ", backend {}", self.backend)?;
        }
        f.write_str(")")
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    name: String,
    path: PathBuf,
    framework: Option<Framework>,
    backend: Backend,
    database: Database,
    orm: Orm,
    styling: Styling,
    typescript: bool,
    package_manager: PackageManager,
    secure_passwords: bool,
    auth_provider: Option<String>,
    install_dependencies: bool,
}

impl ProjectConfigBuilder {
    fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            framework: None,
            backend: Backend::default(),
            database: Database::default(),
            orm: Orm::default(),
            styling: Styling::default(),
            typescript: true,
            package_manager: PackageManager::default(),
            secure_passwords: true,
            auth_provider: None,
            install_dependencies: true,
        }
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn orm(mut self, orm: Orm) -> Self {
        self.orm = orm;
        self
    }

    pub fn styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    pub fn typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn secure_passwords(mut self, secure: bool) -> Self {
        self.secure_passwords = secure;
        self
    }

    pub fn auth_provider(mut self, provider: impl Into<String>) -> Self {
        self.auth_provider = Some(provider.into());
        self
    }

    pub fn install_dependencies(mut self, install: bool) -> Self {
        self.install_dependencies = install;
        self
    }

    /// Finish the config.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` when framework or provider was never set
    /// - `InvalidProject` for an empty name or a relative path
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvalidProject(
                "project name cannot be empty".into(),
            ));
        }

        if !self.path.is_absolute() {
            return Err(DomainError::InvalidProject(format!(
                "project path must be absolute, got '{}'",
                self.path.display()
            )));
        }

        let framework = self
            .framework
            .ok_or(DomainError::MissingRequiredField { field: "framework" })?;

        let auth_provider = self
            .auth_provider
            .filter(|p| !p.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "auth_provider",
            })?;

        Ok(ProjectConfig {
            name,
            path: self.path,
            framework,
            backend: self.backend,
            database: self.database,
            orm: self.orm,
            styling: self.styling,
            typescript: self.typescript,
            package_manager: self.package_manager,
            secure_passwords: self.secure_passwords,
            auth_provider,
            install_dependencies: self.install_dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        std::env::temp_dir().join("stackforge-project")
    }

    #[test]
    fn builder_applies_defaults() {
        let config = ProjectConfig::builder("my-app", root())
            .framework(Framework::Next)
            .auth_provider("clerk")
            .build()
            .unwrap();

        assert_eq!(config.name(), "my-app");
        assert_eq!(config.database(), Database::None);
        assert_eq!(config.backend(), Backend::None);
        assert_eq!(config.package_manager(), PackageManager::Npm);
        assert!(config.typescript());
        assert!(config.secure_passwords());
        assert!(config.install_dependencies());
        assert!(!config.is_monorepo());
    }

    #[test]
    fn missing_framework_is_rejected() {
        let err = ProjectConfig::builder("my-app", root())
            .auth_provider("clerk")
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "framework" });
    }

    #[test]
    fn missing_provider_is_rejected() {
        let err = ProjectConfig::builder("my-app", root())
            .framework(Framework::Next)
            .auth_provider("  ")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingRequiredField {
                field: "auth_provider"
            }
        ));
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = ProjectConfig::builder("my-app", "relative/dir")
            .framework(Framework::Next)
            .auth_provider("clerk")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidProject(_)));
    }

    #[test]
    fn separate_backend_means_monorepo() {
        let config = ProjectConfig::builder("my-app", root())
            .framework(Framework::Next)
            .backend(Backend::Express)
            .auth_provider("better-auth")
            .build()
            .unwrap();
        assert!(config.is_monorepo());
    }

    #[test]
    fn display_summarises_the_stack() {
        let config = ProjectConfig::builder("shop", root())
            .framework(Framework::Next)
            .database(Database::Postgres)
            .orm(Orm::Prisma)
            .auth_provider("auth.js")
            .build()
            .unwrap();
        assert_eq!(config.to_string(), "shop (next + auth.js, postgres/prisma)");
    }
}
