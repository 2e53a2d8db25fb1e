//! File Merge Engine - applies the domain merge rules to real files.
//!
//! Each method reads (or starts from empty), merges, and writes back only
//! when something changed. Errors are returned; deciding whether they are
//! fatal is the caller's job.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::merge::{self, MergeOutcome, MergeTarget};
use crate::domain::GenerationContext;
use crate::error::StackforgeResult;

pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";
pub const PACKAGE_JSON: &str = "package.json";

pub struct FileMergeEngine<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> FileMergeEngine<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// The `.env` and `.env.example` merges for `dir`.
    pub fn env_targets(dir: &Path, ctx: &GenerationContext) -> [MergeTarget; 2] {
        let block = merge::env_block(ctx);
        [
            MergeTarget {
                path: dir.join(ENV_FILE),
                block: block.clone(),
                marker: merge::ENV_MARKER.to_string(),
            },
            MergeTarget {
                path: dir.join(ENV_EXAMPLE_FILE),
                block: merge::example_block(&block),
                marker: merge::ENV_MARKER.to_string(),
            },
        ]
    }

    /// Append a marked block to a file, creating it if needed.
    ///
    /// Returns the path when the file was written, `None` when the marker was
    /// already there.
    pub fn merge_block(&self, target: &MergeTarget) -> StackforgeResult<Option<PathBuf>> {
        let existing = self.read_or_empty(&target.path)?;

        match merge::merge_block(&existing, &target.block, &target.marker) {
            MergeOutcome::AlreadyPresent => {
                debug!(path = %target.path.display(), "Block already present");
                Ok(None)
            }
            MergeOutcome::Applied(content) => {
                self.fs.write_file(&target.path, &content)?;
                info!(path = %target.path.display(), "Merged block");
                Ok(Some(target.path.clone()))
            }
        }
    }

    /// Add the database setup scripts to `dir/package.json`.
    ///
    /// A missing `package.json` is an error: there is nothing sensible to
    /// add scripts to.
    pub fn merge_package_scripts(&self, dir: &Path) -> StackforgeResult<PathBuf> {
        let path = dir.join(PACKAGE_JSON);
        if !self.fs.exists(&path) {
            return Err(ApplicationError::Merge {
                path,
                reason: "file does not exist".into(),
            }
            .into());
        }

        let existing = self.fs.read_to_string(&path)?;
        let merged = merge::merge_package_scripts(&existing).map_err(|e| ApplicationError::Merge {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if merged != existing {
            self.fs.write_file(&path, &merged)?;
            info!(path = %path.display(), "Merged package.json scripts");
        }
        Ok(path)
    }

    /// Fold the auth models into an existing schema file.
    ///
    /// A missing schema file is not created; `Ok(None)` is returned.
    pub fn merge_schema(&self, path: &Path, models: &str) -> StackforgeResult<Option<PathBuf>> {
        if !self.fs.exists(path) {
            debug!(path = %path.display(), "No schema file, skipping");
            return Ok(None);
        }

        let existing = self.fs.read_to_string(path)?;
        match merge::merge_schema(&existing, models) {
            MergeOutcome::AlreadyPresent => {
                debug!(path = %path.display(), "Schema already has auth models");
                Ok(None)
            }
            MergeOutcome::Applied(content) => {
                self.fs.write_file(path, &content)?;
                info!(path = %path.display(), "Merged schema models");
                Ok(Some(path.to_path_buf()))
            }
        }
    }

    fn read_or_empty(&self, path: &Path) -> StackforgeResult<String> {
        if self.fs.exists(path) {
            self.fs.read_to_string(path)
        } else {
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Database, Framework, ProjectConfig, merge::PRISMA_AUTH_MODELS, providers};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MapFs {
        fn with(files: &[(&str, &str)]) -> Self {
            let fs = Self::default();
            for (p, c) in files {
                fs.files
                    .lock()
                    .unwrap()
                    .insert(PathBuf::from(p), c.to_string());
            }
            fs
        }
        fn get(&self, p: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(p)).cloned()
        }
    }

    impl Filesystem for MapFs {
        fn read_to_string(&self, path: &Path) -> StackforgeResult<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "missing".into(),
                    }
                    .into()
                })
        }
        fn write_file(&self, path: &Path, content: &str) -> StackforgeResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
        fn create_dir_all(&self, _: &Path) -> StackforgeResult<()> {
            Ok(())
        }
    }

    fn ctx() -> GenerationContext {
        let config = ProjectConfig::builder("my-app", "/work/my-app")
            .framework(Framework::Next)
            .database(Database::Postgres)
            .secure_passwords(false)
            .auth_provider("auth.js")
            .build()
            .unwrap();
        GenerationContext::build(&config, providers::lookup("auth.js").unwrap())
    }

    #[test]
    fn env_files_are_created_then_left_alone() {
        let fs = MapFs::default();
        let engine = FileMergeEngine::new(&fs);
        let targets = FileMergeEngine::env_targets(Path::new("/work/my-app"), &ctx());

        for t in &targets {
            assert!(engine.merge_block(t).unwrap().is_some());
        }
        let env_once = fs.get("/work/my-app/.env").unwrap();
        let example_once = fs.get("/work/my-app/.env.example").unwrap();

        for t in &targets {
            assert!(engine.merge_block(t).unwrap().is_none());
        }
        assert_eq!(fs.get("/work/my-app/.env").unwrap(), env_once);
        assert_eq!(fs.get("/work/my-app/.env.example").unwrap(), example_once);
        assert!(example_once.contains("AUTH_SECRET=your-value-here"));
        assert!(example_once.contains("AUTH_URL=http://localhost:3000"));
    }

    #[test]
    fn existing_env_content_is_kept() {
        let fs = MapFs::with(&[("/work/my-app/.env", "PORT=3000\n")]);
        let engine = FileMergeEngine::new(&fs);
        let [env, _] = FileMergeEngine::env_targets(Path::new("/work/my-app"), &ctx());

        engine.merge_block(&env).unwrap();
        let content = fs.get("/work/my-app/.env").unwrap();
        assert!(content.starts_with("PORT=3000\n\n# Authentication (Auth.js)\n"));
    }

    #[test]
    fn missing_package_json_is_a_merge_error() {
        let fs = MapFs::default();
        let err = FileMergeEngine::new(&fs)
            .merge_package_scripts(Path::new("/work/my-app"))
            .unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn malformed_package_json_is_left_untouched() {
        let fs = MapFs::with(&[("/work/my-app/package.json", "{oops")]);
        assert!(
            FileMergeEngine::new(&fs)
                .merge_package_scripts(Path::new("/work/my-app"))
                .is_err()
        );
        assert_eq!(fs.get("/work/my-app/package.json").unwrap(), "{oops");
    }

    #[test]
    fn schema_is_not_created_when_absent() {
        let fs = MapFs::default();
        let out = FileMergeEngine::new(&fs)
            .merge_schema(Path::new("/work/prisma/schema.prisma"), PRISMA_AUTH_MODELS)
            .unwrap();
        assert!(out.is_none());
        assert!(fs.get("/work/prisma/schema.prisma").is_none());
    }

    #[test]
    fn schema_gets_models_once() {
        let fs = MapFs::with(&[("/work/prisma/schema.prisma", "generator client {}\n")]);
        let engine = FileMergeEngine::new(&fs);
        let path = Path::new("/work/prisma/schema.prisma");
        assert!(engine.merge_schema(path, PRISMA_AUTH_MODELS).unwrap().is_some());
        assert!(engine.merge_schema(path, PRISMA_AUTH_MODELS).unwrap().is_none());
    }
}
