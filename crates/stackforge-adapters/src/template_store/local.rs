//! Template store backed by a directory tree on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use stackforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::GenerationContext,
    error::{StackforgeError, StackforgeResult},
};

use crate::filesystem::map_io_error;

/// Reads templates from disk and writes rendered copies with `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTemplateStore;

impl LocalTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

fn template_error(path: &Path, reason: impl ToString) -> StackforgeError {
    ApplicationError::TemplateIo {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

impl TemplateStore for LocalTemplateStore {
    fn list_subdirectories(&self, path: &Path) -> StackforgeResult<Vec<String>> {
        let entries = fs::read_dir(path).map_err(|e| template_error(path, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| template_error(path, e))?;
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_files(&self, path: &Path) -> StackforgeResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| template_error(path, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(path)
                .map_err(|e| template_error(entry.path(), e))?;
            files.push(rel.to_path_buf());
        }
        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
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
        let content = fs::read_to_string(src).map_err(|e| template_error(src, e))?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        fs::write(dest, ctx.render(&content)).map_err(|e| map_io_error(dest, e, "write file"))?;

        debug!(src = %src.display(), dest = %dest.display(), "Rendered template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::domain::{Framework, ProjectConfig, providers};
    use tempfile::TempDir;

    fn ctx(root: &Path) -> GenerationContext {
        let config = ProjectConfig::builder("demo", root)
            .framework(Framework::Next)
            .auth_provider("clerk")
            .secure_passwords(false)
            .build()
            .unwrap();
        GenerationContext::build(&config, providers::lookup("clerk").unwrap())
    }

    fn seed(root: &Path, files: &[(&str, &str)]) {
        for (rel, content) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn lists_only_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        seed(
            tmp.path(),
            &[("react/a.ts", ""), ("next/b.ts", ""), ("middleware.ts", "")],
        );
        let dirs = LocalTemplateStore::new()
            .list_subdirectories(tmp.path())
            .unwrap();
        assert_eq!(dirs, vec!["next", "react"]);
    }

    #[test]
    fn listing_a_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(
            LocalTemplateStore::new()
                .list_subdirectories(&tmp.path().join("absent"))
                .is_err()
        );
    }

    #[test]
    fn tree_copy_renders_contents_and_keeps_layout() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        seed(
            src.path(),
            &[
                ("middleware.ts", "// {{PROJECT_NAME}}"),
                ("app/sign-in/page.tsx", "export const provider = '{{PROVIDER_ID}}';"),
            ],
        );

        let written = LocalTemplateStore::new()
            .render_and_copy_tree(src.path(), dest.path(), &ctx(dest.path()))
            .unwrap();

        assert_eq!(
            written,
            vec![
                dest.path().join("app/sign-in/page.tsx"),
                dest.path().join("middleware.ts"),
            ]
        );
        assert_eq!(
            fs::read_to_string(dest.path().join("middleware.ts")).unwrap(),
            "// demo"
        );
        assert_eq!(
            fs::read_to_string(dest.path().join("app/sign-in/page.tsx")).unwrap(),
            "export const provider = 'clerk';"
        );
    }
}
