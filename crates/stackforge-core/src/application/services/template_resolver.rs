//! Template Resolver - picks the template directory for a provider.
//!
//! Layout under the template root:
//!
//! ```text
//! {root}/{feature}/{provider}/           generic variant
//! {root}/{feature}/{provider}/{framework}/  framework-specific variant
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::application::ports::TemplateStore;
use crate::domain::{Framework, SqlDialect};

/// Feature directory for authentication templates.
pub const AUTH_FEATURE: &str = "auth";

/// Shared raw-SQL setup templates live here, per dialect.
pub const SQL_SETUP_DIR: &str = "_sql";

/// The template source chosen for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateLocation {
    pub path: PathBuf,
    pub framework_specific: bool,
}

#[derive(Debug, Clone)]
pub struct TemplateResolver {
    root: PathBuf,
    feature: &'static str,
}

impl TemplateResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            feature: AUTH_FEATURE,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Framework-specific directory if one exists, otherwise the generic one.
    ///
    /// A listing failure is treated as "no framework variants".
    pub fn resolve(
        &self,
        store: &dyn TemplateStore,
        provider_id: &str,
        framework: Framework,
    ) -> TemplateLocation {
        let base = self.root.join(self.feature).join(provider_id);

        let variants = store.list_subdirectories(&base).unwrap_or_else(|e| {
            debug!(path = %base.display(), error = %e, "Template listing failed, using generic");
            Vec::new()
        });

        if variants.iter().any(|v| v == framework.as_str()) {
            let path = base.join(framework.as_str());
            debug!(path = %path.display(), "Using framework-specific templates");
            TemplateLocation {
                path,
                framework_specific: true,
            }
        } else {
            debug!(path = %base.display(), "Using generic templates");
            TemplateLocation {
                path: base,
                framework_specific: false,
            }
        }
    }

    /// Directory holding the raw-SQL migration and setup script for `dialect`.
    pub fn sql_setup_dir(&self, dialect: SqlDialect) -> PathBuf {
        self.root
            .join(self.feature)
            .join(SQL_SETUP_DIR)
            .join(dialect.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GenerationContext;
    use crate::error::StackforgeResult;
    use crate::application::ApplicationError;

    /// Store that knows one listing, or fails every listing.
    struct FakeStore {
        listing: Option<Vec<String>>,
    }

    impl TemplateStore for FakeStore {
        fn list_subdirectories(&self, path: &Path) -> StackforgeResult<Vec<String>> {
            self.listing.clone().ok_or_else(|| {
                ApplicationError::TemplateIo {
                    path: path.to_path_buf(),
                    reason: "unreadable".into(),
                }
                .into()
            })
        }
        fn list_files(&self, _: &Path) -> StackforgeResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn exists(&self, _: &Path) -> bool {
            true
        }
        fn render_and_copy_tree(
            &self,
            _: &Path,
            _: &Path,
            _: &GenerationContext,
        ) -> StackforgeResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn render_and_copy_file(
            &self,
            _: &Path,
            _: &Path,
            _: &GenerationContext,
        ) -> StackforgeResult<()> {
            Ok(())
        }
    }

    fn store(dirs: &[&str]) -> FakeStore {
        FakeStore {
            listing: Some(dirs.iter().map(|d| d.to_string()).collect()),
        }
    }

    #[test]
    fn framework_variant_wins_when_present() {
        let resolver = TemplateResolver::new("/templates");
        let loc = resolver.resolve(&store(&["next", "sveltekit"]), "auth.js", Framework::Next);
        assert_eq!(loc.path, PathBuf::from("/templates/auth/auth.js/next"));
        assert!(loc.framework_specific);
    }

    #[test]
    fn generic_used_when_framework_absent() {
        let resolver = TemplateResolver::new("/templates");
        let loc = resolver.resolve(&store(&["next"]), "auth.js", Framework::SvelteKit);
        assert_eq!(loc.path, PathBuf::from("/templates/auth/auth.js"));
        assert!(!loc.framework_specific);
    }

    #[test]
    fn listing_failure_falls_back_to_generic() {
        let resolver = TemplateResolver::new("/templates");
        let loc = resolver.resolve(&FakeStore { listing: None }, "clerk", Framework::Next);
        assert_eq!(loc.path, PathBuf::from("/templates/auth/clerk"));
        assert!(!loc.framework_specific);
    }

    #[test]
    fn sql_setup_dir_per_dialect() {
        let resolver = TemplateResolver::new("/templates");
        assert_eq!(
            resolver.sql_setup_dir(SqlDialect::Mysql),
            PathBuf::from("/templates/auth/_sql/mysql")
        );
    }
}
