//! Generation Service - main application orchestrator.
//!
//! This service sequences one run of the auth feature generator:
//!
//! ```text
//! NotStarted → Validating → Skipped
//!                         ↘ Installing → TemplateCopying → EnvMerging
//!                                      → SchemaMerging (Prisma only) → Completed
//! ```
//!
//! Validation and installation failures are fatal and propagate. Failures
//! while copying templates or merging files are recovered: logged, handed to
//! the [`ErrorCollector`], and reported as warnings on a successful run.
//! Nothing is rolled back.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::{
    ApplicationError,
    ports::{ErrorCollector, Filesystem, PackageInstaller, TemplateStore},
    services::{
        installer::{InstallPlan, InstallationOrchestrator},
        merge_service::FileMergeEngine,
        template_resolver::{TemplateLocation, TemplateResolver},
    },
};
use crate::domain::{
    CompatibilityValidator, Framework, GenerationContext, Layout, Orm, ProjectConfig, ProviderDef,
    SessionStrategy, Validated, classify_layout, merge::PRISMA_AUTH_MODELS, providers,
};
use crate::error::{StackforgeError, StackforgeResult};

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationState {
    NotStarted,
    Validating,
    Skipped,
    Installing,
    TemplateCopying,
    EnvMerging,
    SchemaMerging,
    Completed,
}

impl GenerationState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Validating => "validating",
            Self::Skipped => "skipped",
            Self::Installing => "installing",
            Self::TemplateCopying => "copying templates",
            Self::EnvMerging => "merging env files",
            Self::SchemaMerging => "merging schema",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

/// Cooperative cancellation flag, checked before every state transition.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// A recovered failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationWarning {
    pub state: GenerationState,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub state: GenerationState,
    pub provider: String,
    /// Why the run was skipped, when it was.
    pub skip_reason: Option<String>,
    pub layout: Option<Layout>,
    pub template: Option<TemplateLocation>,
    /// Files written or merged, in the order they were touched.
    pub files: Vec<PathBuf>,
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationReport {
    fn new(provider: &str) -> Self {
        Self {
            state: GenerationState::NotStarted,
            provider: provider.to_string(),
            skip_reason: None,
            layout: None,
            template: None,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.state == GenerationState::Skipped
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Provider metadata for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub session_strategy: String,
    pub requires_database: bool,
    pub frameworks: Vec<String>,
}

impl From<&ProviderDef> for ProviderInfo {
    fn from(def: &ProviderDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.display_name.to_string(),
            session_strategy: def.session_strategy.to_string(),
            requires_database: def.requires_database,
            frameworks: def
                .supported_frameworks
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

/// Every registered provider, in registry order.
pub fn list_providers() -> Vec<ProviderInfo> {
    providers::all_providers().map(ProviderInfo::from).collect()
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main generation service.
pub struct GenerationService {
    store: Box<dyn TemplateStore>,
    filesystem: Box<dyn Filesystem>,
    installer: Box<dyn PackageInstaller>,
    collector: Box<dyn ErrorCollector>,
    resolver: TemplateResolver,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = GenerationService::new(
    ///     store,      // impl TemplateStore
    ///     filesystem, // impl Filesystem
    ///     installer,  // impl PackageInstaller
    ///     collector,  // impl ErrorCollector
    ///     "./templates",
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        filesystem: Box<dyn Filesystem>,
        installer: Box<dyn PackageInstaller>,
        collector: Box<dyn ErrorCollector>,
        template_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            filesystem,
            installer,
            collector,
            resolver: TemplateResolver::new(template_root),
        }
    }

    /// Generate the auth feature for `config`.
    pub fn generate(&self, config: &ProjectConfig) -> StackforgeResult<GenerationReport> {
        self.generate_with_cancel(config, &CancellationToken::new())
    }

    /// Generate, checking `cancel` before every state transition.
    ///
    /// Cancellation returns `ApplicationError::Cancelled`; files already
    /// written are kept.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            provider = %config.auth_provider(),
            framework = %config.framework()
        )
    )]
    pub fn generate_with_cancel(
        &self,
        config: &ProjectConfig,
        cancel: &CancellationToken,
    ) -> StackforgeResult<GenerationReport> {
        let mut report = GenerationReport::new(config.auth_provider());

        // 1. Validate (fatal)
        self.enter(&mut report, GenerationState::Validating, cancel)?;
        let provider = match CompatibilityValidator::validate(config)? {
            Validated::Proceed(provider) => provider,
            Validated::Skip(unmet) => {
                warn!(provider = unmet.provider, reason = %unmet.reason, "Skipping auth generation");
                report.skip_reason = Some(unmet.reason);
                report.state = GenerationState::Skipped;
                return Ok(report);
            }
        };

        let layout = classify_layout(config, provider);
        let sql_setup = uses_raw_sql_setup(config, provider);
        info!(
            target_dir = %layout.install_target.display(),
            monorepo = layout.is_monorepo,
            sql_setup,
            "Layout classified"
        );
        report.layout = Some(layout.clone());

        // 2. Install (fatal)
        self.enter(&mut report, GenerationState::Installing, cancel)?;
        if config.install_dependencies() {
            let plan = InstallPlan::for_provider(config, provider, sql_setup);
            InstallationOrchestrator::new(self.installer.as_ref()).install(
                config,
                &plan,
                &layout.install_target,
            )?;
        } else {
            info!("Dependency installation disabled");
        }

        // 3. Resolve and copy templates (recoverable)
        self.enter(&mut report, GenerationState::TemplateCopying, cancel)?;
        let location = self
            .resolver
            .resolve(self.store.as_ref(), provider.id.as_str(), config.framework());
        info!(
            path = %location.path.display(),
            framework_specific = location.framework_specific,
            "Template resolved"
        );
        report.template = Some(location.clone());

        let ctx = GenerationContext::build(config, provider);
        let dest = &layout.template_destination;

        match self.copy_provider_templates(&location, dest, &ctx) {
            Ok(files) => report.files.extend(files),
            Err(e) => self.recover(&mut report, "copying provider templates", e),
        }

        if sql_setup {
            if let Some(dialect) = config.database().sql_dialect() {
                let src = self.resolver.sql_setup_dir(dialect);
                match self.copy_tree(&src, dest, &ctx) {
                    Ok(files) => report.files.extend(files),
                    Err(e) => self.recover(&mut report, "copying database setup templates", e),
                }
            }
        }

        // 4. Merge env files and scripts (recoverable)
        self.enter(&mut report, GenerationState::EnvMerging, cancel)?;
        let engine = FileMergeEngine::new(self.filesystem.as_ref());
        for target in FileMergeEngine::env_targets(dest, &ctx) {
            match engine.merge_block(&target) {
                Ok(Some(path)) => report.files.push(path),
                Ok(None) => {}
                Err(e) => {
                    let what = format!("merging {}", target.path.display());
                    self.recover(&mut report, &what, e)
                }
            }
        }

        if sql_setup {
            match engine.merge_package_scripts(dest) {
                Ok(path) => report.files.push(path),
                Err(e) => self.recover(&mut report, "merging package.json scripts", e),
            }
        }

        // 5. Merge ORM schema (recoverable, Prisma only)
        if let Some(schema) = config.orm().schema_path() {
            self.enter(&mut report, GenerationState::SchemaMerging, cancel)?;
            match engine.merge_schema(&dest.join(schema), PRISMA_AUTH_MODELS) {
                Ok(Some(path)) => report.files.push(path),
                Ok(None) => {}
                Err(e) => self.recover(&mut report, "merging schema", e),
            }
        }

        self.enter(&mut report, GenerationState::Completed, cancel)?;
        info!(
            files = report.files.len(),
            warnings = report.warnings.len(),
            "Generation completed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn enter(
        &self,
        report: &mut GenerationReport,
        next: GenerationState,
        cancel: &CancellationToken,
    ) -> StackforgeResult<()> {
        if cancel.is_cancelled() {
            warn!(state = %report.state, "Generation cancelled");
            return Err(ApplicationError::Cancelled {
                state: report.state.to_string(),
            }
            .into());
        }
        info!(from = %report.state, to = %next, "State transition");
        report.state = next;
        Ok(())
    }

    fn ensure_template_dir(&self, src: &Path) -> StackforgeResult<()> {
        if self.store.exists(src) {
            Ok(())
        } else {
            Err(ApplicationError::TemplateIo {
                path: src.to_path_buf(),
                reason: "template directory not found".into(),
            }
            .into())
        }
    }

    fn copy_tree(
        &self,
        src: &Path,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<Vec<PathBuf>> {
        self.ensure_template_dir(src)?;
        self.store.render_and_copy_tree(src, dest, ctx)
    }

    /// Copy the resolved provider templates.
    ///
    /// The generic directory also holds the framework variants; those
    /// subdirectories are left out.
    fn copy_provider_templates(
        &self,
        location: &TemplateLocation,
        dest: &Path,
        ctx: &GenerationContext,
    ) -> StackforgeResult<Vec<PathBuf>> {
        self.ensure_template_dir(&location.path)?;

        let mut written = Vec::new();
        for rel in self.store.list_files(&location.path)? {
            if !location.framework_specific && is_framework_variant(&rel) {
                continue;
            }
            let target = dest.join(&rel);
            self.store
                .render_and_copy_file(&location.path.join(&rel), &target, ctx)?;
            written.push(target);
        }
        Ok(written)
    }

    fn recover(&self, report: &mut GenerationReport, context: &str, error: StackforgeError) {
        warn!(state = %report.state, context, error = %error, "Recovered from error");
        self.collector.collect(context, &error);
        report.warnings.push(GenerationWarning {
            state: report.state,
            context: context.to_string(),
            message: error.to_string(),
        });
    }
}

/// A file inside a `{framework}/` subdirectory of a provider template.
fn is_framework_variant(rel: &Path) -> bool {
    let mut components = rel.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first
            .as_os_str()
            .to_str()
            .is_some_and(|name| name.parse::<Framework>().is_ok()),
        _ => false,
    }
}

/// Raw SQL migrations apply to SQL databases without an ORM, for providers
/// that can keep sessions in the database.
pub fn uses_raw_sql_setup(config: &ProjectConfig, provider: &ProviderDef) -> bool {
    config.orm() == Orm::None
        && config.database().sql_dialect().is_some()
        && matches!(
            provider.session_strategy,
            SessionStrategy::Database | SessionStrategy::Both
        )
}
