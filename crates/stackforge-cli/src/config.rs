//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! core crate never sees it; commands turn it into builder calls.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `STACKFORGE__SECTION__KEY` environment variables
//! 3. The config file: `--config`, else `./.stackforge.toml`, else the
//!    platform config dir
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name used by `init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".stackforge.toml";

const ENV_PREFIX: &str = "STACKFORGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

/// Stack values used when a flag is not given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub package_manager: String,
    pub framework: Option<String>,
    pub database: String,
    pub secure_passwords: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub root: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                package_manager: "npm".into(),
                framework: None,
                database: "none".into(),
                secure_passwords: true,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            templates: TemplateConfig { root: None },
        }
    }
}

impl AppConfig {
    /// Load configuration on top of the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), true),
            None => (Self::config_path(), false),
        };

        let built = Config::builder()
            .add_source(
                Config::try_from(&Self::default()).context("Failed to encode default config")?,
            )
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        built
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// The configuration file that [`load`](Self::load) reads when no
    /// `--config` is given.
    pub fn config_path() -> PathBuf {
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local.to_path_buf();
        }
        Self::global_path()
    }

    /// Config file in the platform config dir, falling back to the local
    /// file name when no home directory is known.
    pub fn global_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stackforge", "stackforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up one dotted key for `config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "defaults.package_manager" => self.defaults.package_manager.clone(),
            "defaults.framework" => self.defaults.framework.clone().unwrap_or_default(),
            "defaults.database" => self.defaults.database.clone(),
            "defaults.secure_passwords" => self.defaults.secure_passwords.to_string(),
            "templates.root" => self
                .templates
                .root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub const KEYS: &'static [&'static str] = &[
        "defaults.package_manager",
        "defaults.framework",
        "defaults.database",
        "defaults.secure_passwords",
        "templates.root",
        "output.no_color",
        "output.format",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_secure_npm_without_database() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.package_manager, "npm");
        assert_eq!(cfg.defaults.database, "none");
        assert!(cfg.defaults.secure_passwords);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("stackforge.toml");
        fs::write(
            &path,
            r#"
[defaults]
package_manager = "pnpm"
framework = "next"
database = "postgres"
secure_passwords = false

[output]
no_color = true
format = "plain"

[templates]
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.package_manager, "pnpm");
        assert_eq!(cfg.defaults.framework.as_deref(), Some("next"));
        assert!(!cfg.defaults.secure_passwords);
        assert!(cfg.output.no_color);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("partial.toml");
        fs::write(&path, "[defaults]\ndatabase = \"sqlite\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.database, "sqlite");
        assert_eq!(cfg.defaults.package_manager, "npm");
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/stackforge.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.package_manager").as_deref(), Some("npm"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("defaults.framework").as_deref(), Some(""));
        assert!(cfg.get("does.not.exist").is_none());
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
    }
}
