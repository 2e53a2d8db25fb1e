//! In-memory template store for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stackforge_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
    },
    domain::GenerationContext,
    error::StackforgeResult,
};

use crate::filesystem::MemoryFilesystem;

/// Thread-safe in-memory template store.
///
/// Templates are keyed by absolute path. Rendered output goes to a
/// [`MemoryFilesystem`], normally the same one the service writes to.
#[derive(Debug, Clone)]
pub struct MemoryTemplateStore {
    templates: Arc<RwLock<BTreeMap<PathBuf, String>>>,
    output: MemoryFilesystem,
}

impl MemoryTemplateStore {
    /// Create a new empty store writing into `output`.
    pub fn new(output: MemoryFilesystem) -> Self {
        Self {
            templates: Arc::new(RwLock::new(BTreeMap::new())),
            output,
        }
    }

    /// Add a template file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> StackforgeResult<()> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        templates.insert(path.into(), content.into());
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for test setup.
    pub fn with(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(path.into(), content.into());
        }
        self
    }

    /// Get the number of template files.
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn list_subdirectories(&self, path: &Path) -> StackforgeResult<Vec<String>> {
        let templates = self
            .templates
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut dirs: Vec<String> = templates
            .keys()
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter(|rel| rel.components().count() > 1)
            .filter_map(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        dirs.sort();
        dirs.dedup();

        if dirs.is_empty() && !templates.keys().any(|k| k.starts_with(path)) {
            return Err(ApplicationError::TemplateIo {
                path: path.to_path_buf(),
                reason: "no such template directory".into(),
            }
            .into());
        }
        Ok(dirs)
    }

    fn list_files(&self, path: &Path) -> StackforgeResult<Vec<PathBuf>> {
        let templates = self
            .templates
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(templates
            .keys()
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.templates
            .read()
            .map(|t| t.keys().any(|k| k.starts_with(path)))
            .unwrap_or(false)
    }

    fn render_and_copy_tree(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for rel in self.list_files(src)? {
            let target = dest.join(&rel);
            self.render_and_copy_file(&src.join(&rel), &target, ctx)?;
            written.push(target);
        }
        Ok(written)
    }

    fn render_and_copy_file(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<()> {
        let content = {
            let templates = self
                .templates
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?;
            templates.get(src).cloned().ok_or_else(|| ApplicationError::TemplateIo {
                path: src.to_path_buf(),
                reason: "no such template".into(),
            })?
        };
        self.output.write_file(dest, &ctx.render(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdirectories_are_derived_from_paths() {
        let store = MemoryTemplateStore::new(MemoryFilesystem::new())
            .with("/t/auth/clerk/next/a.ts", "")
            .with("/t/auth/clerk/next/b.ts", "")
            .with("/t/auth/clerk/react/a.ts", "")
            .with("/t/auth/clerk/readme.md", "");

        assert_eq!(
            store
                .list_subdirectories(Path::new("/t/auth/clerk"))
                .unwrap(),
            vec!["next", "react"]
        );
    }

    #[test]
    fn unknown_directory_fails_listing() {
        let store = MemoryTemplateStore::new(MemoryFilesystem::new());
        assert!(store.list_subdirectories(Path::new("/t/auth/x")).is_err());
    }

    #[test]
    fn files_are_relative_to_the_listed_root() {
        let store = MemoryTemplateStore::new(MemoryFilesystem::new())
            .with("/t/a/x.ts", "")
            .with("/t/a/sub/y.ts", "");
        assert_eq!(
            store.list_files(Path::new("/t/a")).unwrap(),
            vec![PathBuf::from("sub/y.ts"), PathBuf::from("x.ts")]
        );
        assert_eq!(store.len(), 2);
    }
}
