//! Implementation of `stackforge add-auth`.
//!
//! Turns flags and config defaults into a `ProjectConfig`, wires the local
//! adapters into a `GenerationService` and reports the outcome. Stack rules
//! stay in the core.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, instrument};

use stackforge_adapters::{CommandInstaller, LocalFilesystem, LocalTemplateStore, MemoryCollector};
use stackforge_core::{
    application::{
        GenerationReport, GenerationService, GenerationState, InstallPlan, TemplateLocation,
        TemplateResolver, uses_raw_sql_setup,
        services::template_resolver::AUTH_FEATURE,
    },
    domain::{
        CompatibilityValidator, Database, Layout, PackageManager, ProjectConfig, Validated,
        classify_layout,
    },
    error::StackforgeError,
};

use crate::{
    cli::{AddAuthArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Build-time location of the repository's template tree.
const BUILD_TEMPLATE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

#[instrument(skip_all, fields(provider = %args.provider))]
pub fn execute(
    args: AddAuthArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Project directory and name
    let project_dir = resolve_project_dir(&args.path)?;
    let project_name = match &args.name {
        Some(name) => name.clone(),
        None => dir_name(&project_dir)?,
    };
    validate_project_name(&project_name)?;

    // 2. Templates
    let template_root = resolve_template_root(args.templates.as_deref(), &config);
    if !template_root.join(AUTH_FEATURE).is_dir() {
        return Err(CliError::TemplatesNotFound {
            path: template_root,
        });
    }

    // 3. Stack configuration
    let project = build_project_config(&args, &config, &project_name, &project_dir)?;
    debug!(%project, templates = %template_root.display(), "Project configuration resolved");

    // 4. Confirm
    let interactive = !global.quiet && output.format() != OutputFormat::Json;
    if interactive && !args.yes && !args.dry_run {
        show_configuration(&project, &template_root, &output)?;
        if !confirm(&format!("Add {} to '{}'?", project.auth_provider(), project_name))? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Dry run
    if args.dry_run {
        let plan = preview(&project, &template_root)?;
        return print_preview(&plan, &project, &output);
    }

    // 6. Generate
    let collector = MemoryCollector::new();
    let service = GenerationService::new(
        Box::new(LocalTemplateStore::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(CommandInstaller::new()),
        Box::new(collector.clone()),
        template_root,
    );

    info!(project = %project_name, path = %project_dir.display(), "Generation started");
    let spinner = output.spinner(&format!(
        "Adding {} to {project_name}...",
        project.auth_provider()
    ));
    let result = service.generate(&project);
    spinner.finish_and_clear();
    let report = result?;
    info!(state = %report.state, warnings = collector.len(), "Generation finished");

    // 7. Report
    if output.format() == OutputFormat::Json {
        output.json(&report)?;
        return Ok(());
    }
    print_report(&report, &project, &output)?;
    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

fn resolve_project_dir(path: &Path) -> CliResult<PathBuf> {
    if !path.is_dir() {
        return Err(CliError::ProjectNotFound {
            path: path.to_path_buf(),
        });
    }
    path.canonicalize().map_err(|e| CliError::IoError {
        message: format!("failed to resolve '{}'", path.display()),
        source: e,
    })
}

fn dir_name(dir: &Path) -> CliResult<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidProjectName {
            name: dir.display().to_string(),
            reason: "cannot derive a project name from this directory".into(),
        })
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let reason = if name.trim().is_empty() {
        "name cannot be empty"
    } else if name.starts_with('.') {
        "name cannot start with '.'"
    } else if name.contains('/') || name.contains('\\') {
        "name cannot contain path separators"
    } else {
        return Ok(());
    };
    Err(CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    })
}

/// `--templates`, then `templates.root`, then a tree shipped next to the
/// binary, then the tree in the source checkout.
fn resolve_template_root(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    if let Some(path) = flag.or(config.templates.root.as_deref()) {
        return path.to_path_buf();
    }

    let beside_binary = std::env::current_exe().ok().and_then(|exe| {
        let dir = exe.parent()?.to_path_buf();
        [dir.join("templates"), dir.join("../share/stackforge/templates")]
            .into_iter()
            .find(|candidate| candidate.join(AUTH_FEATURE).is_dir())
    });

    beside_binary.unwrap_or_else(|| PathBuf::from(BUILD_TEMPLATE_ROOT))
}

// ── Config construction ───────────────────────────────────────────────────────

/// A config default that must parse into a core value.
fn config_value<T>(key: &str, raw: &str) -> CliResult<T>
where
    T: FromStr<Err = stackforge_core::domain::DomainError>,
{
    raw.parse::<T>().map_err(|e| CliError::ConfigError {
        message: format!("{key}: {e}"),
        source: Some(Box::new(e)),
    })
}

fn build_project_config(
    args: &AddAuthArgs,
    config: &AppConfig,
    name: &str,
    dir: &Path,
) -> CliResult<ProjectConfig> {
    let defaults = &config.defaults;

    let database = match args.database {
        Some(db) => db,
        None => config_value::<Database>("defaults.database", &defaults.database)?,
    };
    let package_manager = match args.package_manager {
        Some(pm) => pm,
        None => {
            config_value::<PackageManager>("defaults.package_manager", &defaults.package_manager)?
        }
    };
    let framework = match (args.framework, defaults.framework.as_deref()) {
        (Some(fw), _) => Some(fw),
        (None, Some(raw)) if !raw.is_empty() => Some(config_value("defaults.framework", raw)?),
        (None, _) => None,
    };

    let mut builder = ProjectConfig::builder(name, dir)
        .database(database)
        .package_manager(package_manager)
        .typescript(!args.javascript)
        .secure_passwords(defaults.secure_passwords && !args.insecure_secrets)
        .install_dependencies(!args.skip_install)
        .auth_provider(args.provider.as_str());

    if let Some(fw) = framework {
        builder = builder.framework(fw);
    }
    if let Some(backend) = args.backend {
        builder = builder.backend(backend);
    }
    if let Some(orm) = args.orm {
        builder = builder.orm(orm);
    }
    if let Some(styling) = args.styling {
        builder = builder.styling(styling);
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

// ── Dry run ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Preview {
    Skip {
        provider: String,
        reason: String,
    },
    Generate {
        provider: String,
        layout: Layout,
        template: TemplateLocation,
        sql_setup: bool,
        runtime_packages: Vec<String>,
        dev_packages: Vec<String>,
    },
}

/// What a run would do, computed without touching the project.
fn preview(project: &ProjectConfig, template_root: &Path) -> CliResult<Preview> {
    let provider = match CompatibilityValidator::validate(project).map_err(StackforgeError::from)? {
        Validated::Skip(unmet) => {
            return Ok(Preview::Skip {
                provider: unmet.provider.to_string(),
                reason: unmet.reason,
            });
        }
        Validated::Proceed(provider) => provider,
    };

    let sql_setup = uses_raw_sql_setup(project, provider);
    let plan = if project.install_dependencies() {
        InstallPlan::for_provider(project, provider, sql_setup)
    } else {
        InstallPlan::default()
    };
    let template = TemplateResolver::new(template_root).resolve(
        &LocalTemplateStore::new(),
        provider.id.as_str(),
        project.framework(),
    );

    Ok(Preview::Generate {
        provider: provider.display_name.to_string(),
        layout: classify_layout(project, provider),
        template,
        sql_setup,
        runtime_packages: plan.runtime,
        dev_packages: plan.dev,
    })
}

fn print_preview(preview: &Preview, project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(preview)?;
        return Ok(());
    }

    match preview {
        Preview::Skip { provider, reason } => {
            out.warning(&format!("Dry run: {provider} would be skipped ({reason})"))?;
        }
        Preview::Generate {
            provider,
            layout,
            template,
            sql_setup,
            runtime_packages,
            dev_packages,
        } => {
            out.info(&format!("Dry run: would add {provider} to '{}'", project.name()))?;
            out.field("Target", layout.install_target.display())?;
            out.field("Templates", template.path.display())?;
            out.field(
                "Variant",
                if template.framework_specific {
                    project.framework().as_str()
                } else {
                    "generic"
                },
            )?;
            out.field("Packages", list_or_none(runtime_packages))?;
            out.field("Dev packages", list_or_none(dev_packages))?;
            out.field("SQL setup", if *sql_setup { "yes" } else { "no" })?;
        }
    }
    Ok(())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".into()
    } else {
        items.join(" ")
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ProjectConfig,
    template_root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.field("Project", project.name())?;
    out.field("Location", project.path().display())?;
    out.field("Provider", project.auth_provider())?;
    out.field("Framework", project.framework())?;
    out.field("Backend", project.backend())?;
    out.field("Database", project.database())?;
    out.field("ORM", project.orm())?;
    out.field("Package manager", project.package_manager())?;
    out.field("Templates", template_root.display())?;
    out.print("")?;
    Ok(())
}

fn print_report(
    report: &GenerationReport,
    project: &ProjectConfig,
    out: &OutputManager,
) -> CliResult<()> {
    if report.state == GenerationState::Skipped {
        out.warning(&format!(
            "Skipped {}: {}",
            report.provider,
            report.skip_reason.as_deref().unwrap_or("prerequisites not met")
        ))?;
        return Ok(());
    }

    out.success(&format!(
        "Added {} to '{}'",
        report.provider,
        project.name()
    ))?;

    if !report.files.is_empty() {
        out.print("")?;
        out.print("Files:")?;
        for file in &report.files {
            let shown = file.strip_prefix(project.path()).unwrap_or(file);
            out.print(&format!("  {}", shown.display()))?;
        }
    }

    for warning in &report.warnings {
        out.warning(&format!("{}: {}", warning.context, warning.message))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print("  Fill in the provider keys in .env")?;
    if report
        .files
        .iter()
        .any(|f| f.ends_with("scripts/setup-auth-db.ts"))
    {
        out.print(&format!(
            "  {} run db:setup",
            project.package_manager().as_str()
        ))?;
    }
    if !project.install_dependencies() {
        out.print(&format!(
            "  {} install",
            project.package_manager().as_str()
        ))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        debug!("stdin is not a terminal, skipping confirmation");
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e.into(),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    if !io::stdin().is_terminal() {
        debug!("stdin is not a terminal, skipping confirmation");
        return Ok(true);
    }

    print!("{prompt} [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
