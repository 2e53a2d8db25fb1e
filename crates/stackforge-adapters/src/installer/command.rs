//! Package installer that spawns the real package manager.

use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, info};

use stackforge_core::{
    application::{
        ApplicationError,
        ports::{InstallOptions, PackageInstaller},
    },
    domain::PackageManager,
    error::StackforgeResult,
};

/// Runs `npm install` / `pnpm add` / `yarn add` / `bun add`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInstaller;

impl CommandInstaller {
    pub fn new() -> Self {
        Self
    }

    /// The program and arguments for one invocation.
    pub fn command_line(packages: &[String], options: &InstallOptions) -> (String, Vec<String>) {
        let mut args: Vec<String> = options
            .package_manager
            .install_args(options.dev)
            .into_iter()
            .map(str::to_string)
            .collect();
        args.extend(packages.iter().cloned());
        (program(options.package_manager), args)
    }
}

/// On Windows the package managers are `.cmd` shims.
fn program(pm: PackageManager) -> String {
    if cfg!(windows) && pm != PackageManager::Bun {
        format!("{}.cmd", pm.as_str())
    } else {
        pm.as_str().to_string()
    }
}

fn failure(pm: PackageManager, reason: impl Into<String>) -> ApplicationError {
    ApplicationError::Install {
        package_manager: pm.to_string(),
        reason: reason.into(),
    }
}

fn describe(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let last = stderr.lines().rev().find(|l| !l.trim().is_empty());
    match (output.status.code(), last) {
        (Some(code), Some(line)) => format!("exit code {code}: {}", line.trim()),
        (Some(code), None) => format!("exit code {code}"),
        (None, _) => "terminated by signal".to_string(),
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, packages: &[String], options: &InstallOptions) -> StackforgeResult<()> {
        let pm = options.package_manager;
        let dir: &Path = &options.project_path;

        if !dir.is_dir() {
            return Err(failure(pm, format!("{} is not a directory", dir.display())).into());
        }

        let (program, args) = Self::command_line(packages, options);
        info!(%program, args = %args.join(" "), dir = %dir.display(), "Running package manager");

        let output = Command::new(&program)
            .args(&args)
            .current_dir(dir)
            .output()
            .map_err(|e| failure(pm, format!("could not run {program}: {e}")))?;

        if output.status.success() {
            debug!(%program, "Package manager finished");
            Ok(())
        } else {
            Err(failure(pm, describe(&output)).into())
        }
    }
}
