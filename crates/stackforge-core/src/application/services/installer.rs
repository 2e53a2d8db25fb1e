//! Installation Orchestrator - turns a provider into package-manager calls.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::application::ports::{InstallOptions, PackageInstaller};
use crate::domain::{ProjectConfig, ProviderDef};
use crate::error::StackforgeResult;

/// Dev dependency that runs the raw-SQL setup script.
pub const SQL_SETUP_RUNNER: &str = "tsx";

/// Runtime and dev packages for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    pub runtime: Vec<String>,
    pub dev: Vec<String>,
}

impl InstallPlan {
    /// Packages for `config` with `provider`.
    ///
    /// With `sql_setup`, the database driver joins the runtime list and the
    /// script runner joins the dev list.
    pub fn for_provider(config: &ProjectConfig, provider: &ProviderDef, sql_setup: bool) -> Self {
        let framework = config.framework();
        let mut runtime: Vec<String> = provider
            .packages_for(framework)
            .iter()
            .map(|p| p.to_string())
            .collect();
        let mut dev: Vec<String> = provider
            .dev_packages_for(framework)
            .iter()
            .map(|p| p.to_string())
            .collect();

        if sql_setup {
            if let Some(dialect) = config.database().sql_dialect() {
                runtime.push(dialect.driver_package().to_string());
            }
            dev.push(SQL_SETUP_RUNNER.to_string());
        }

        Self { runtime, dev }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.dev.is_empty()
    }
}

/// Runs an [`InstallPlan`] through the [`PackageInstaller`] port.
pub struct InstallationOrchestrator<'a> {
    installer: &'a dyn PackageInstaller,
}

impl<'a> InstallationOrchestrator<'a> {
    pub fn new(installer: &'a dyn PackageInstaller) -> Self {
        Self { installer }
    }

    /// Runtime packages first, then dev packages. Empty lists are skipped.
    ///
    /// Any failure is returned immediately; dev packages are not attempted
    /// after a failed runtime install.
    #[instrument(skip_all, fields(target = %target.display(), pm = %config.package_manager()))]
    pub fn install(
        &self,
        config: &ProjectConfig,
        plan: &InstallPlan,
        target: &Path,
    ) -> StackforgeResult<()> {
        for (packages, dev) in [(&plan.runtime, false), (&plan.dev, true)] {
            if packages.is_empty() {
                debug!(dev, "No packages to install");
                continue;
            }

            info!(dev, packages = %packages.join(" "), "Installing packages");
            self.installer.install(
                packages,
                &InstallOptions {
                    package_manager: config.package_manager(),
                    project_path: target.to_path_buf(),
                    dev,
                },
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::MockPackageInstaller;
    use crate::domain::{Database, Framework, PackageManager, providers};
    use mockall::Sequence;
    use std::path::PathBuf;

    fn config(provider: &str, framework: Framework, database: Database) -> ProjectConfig {
        ProjectConfig::builder("my-app", std::env::temp_dir().join("my-app"))
            .framework(framework)
            .database(database)
            .package_manager(PackageManager::Pnpm)
            .auth_provider(provider)
            .build()
            .unwrap()
    }

    // ── InstallPlan ───────────────────────────────────────────────────────

    #[test]
    fn plan_uses_framework_bucket() {
        let cfg = config("auth.js", Framework::Next, Database::Postgres);
        let plan = InstallPlan::for_provider(&cfg, providers::lookup("auth.js").unwrap(), false);
        assert_eq!(plan.runtime, vec!["next-auth@beta"]);
        assert!(plan.dev.is_empty());
    }

    #[test]
    fn sql_setup_adds_driver_and_runner() {
        let cfg = config("auth.js", Framework::Next, Database::Postgres);
        let plan = InstallPlan::for_provider(&cfg, providers::lookup("auth.js").unwrap(), true);
        assert_eq!(plan.runtime, vec!["next-auth@beta", "pg"]);
        assert_eq!(plan.dev, vec!["tsx"]);
    }

    #[test]
    fn hosted_engines_install_their_dialect_driver() {
        for (db, driver) in [
            (Database::Neon, "pg"),
            (Database::Planetscale, "mysql2"),
            (Database::Turso, "better-sqlite3"),
        ] {
            let cfg = config("auth.js", Framework::Next, db);
            let plan = InstallPlan::for_provider(&cfg, providers::lookup("auth.js").unwrap(), true);
            assert_eq!(plan.runtime, vec!["next-auth@beta", driver], "{db}");
        }
    }

    // ── install ───────────────────────────────────────────────────────────

    #[test]
    fn runtime_then_dev_in_order() {
        let cfg = config("better-auth", Framework::Next, Database::Postgres);
        let plan =
            InstallPlan::for_provider(&cfg, providers::lookup("better-auth").unwrap(), false);
        let target = PathBuf::from("/work/my-app");

        let mut seq = Sequence::new();
        let mut mock = MockPackageInstaller::new();
        mock.expect_install()
            .withf(|pkgs, opts| pkgs == ["better-auth"] && !opts.dev)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        mock.expect_install()
            .withf(|pkgs, opts| {
                pkgs == ["@better-auth/cli"]
                    && opts.dev
                    && opts.package_manager == PackageManager::Pnpm
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        InstallationOrchestrator::new(&mock)
            .install(&cfg, &plan, &target)
            .unwrap();
    }

    #[test]
    fn empty_dev_list_is_not_invoked() {
        let cfg = config("clerk", Framework::Next, Database::None);
        let plan = InstallPlan::for_provider(&cfg, providers::lookup("clerk").unwrap(), false);

        let mut mock = MockPackageInstaller::new();
        mock.expect_install()
            .withf(|_, opts| !opts.dev)
            .times(1)
            .returning(|_, _| Ok(()));

        InstallationOrchestrator::new(&mock)
            .install(&cfg, &plan, Path::new("/work"))
            .unwrap();
    }

    #[test]
    fn runtime_failure_stops_before_dev() {
        let cfg = config("better-auth", Framework::Next, Database::Postgres);
        let plan =
            InstallPlan::for_provider(&cfg, providers::lookup("better-auth").unwrap(), false);

        let mut mock = MockPackageInstaller::new();
        mock.expect_install().times(1).returning(|_, opts| {
            Err(ApplicationError::Install {
                package_manager: opts.package_manager.to_string(),
                reason: "exit status 1".into(),
            }
            .into())
        });

        let err = InstallationOrchestrator::new(&mock)
            .install(&cfg, &plan, Path::new("/work"))
            .unwrap_err();
        assert!(err.to_string().contains("pnpm install failed"));
    }
}
