//! CLI argument definitions using the clap derive API.
//!
//! Argument names, aliases and help text live here. Stack values parse
//! straight into the core value objects, so `--framework nextjs` and
//! `--framework next` both land on `Framework::Next`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stackforge_core::domain::{Backend, Database, Framework, Orm, PackageManager, Styling};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "stackforge",
    bin_name = "stackforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Stack-aware auth scaffolding for web apps",
    long_about = "stackforge adds an authentication provider to an existing web \
                  project: it installs the right packages, copies templates for \
                  your framework and merges env files, scripts and schemas.",
    after_help = "EXAMPLES:\n\
        \x20 stackforge add-auth auth.js --framework next --database postgres\n\
        \x20 stackforge add-auth clerk -f react --path ./web --yes\n\
        \x20 stackforge list --framework sveltekit\n\
        \x20 stackforge completions bash > ~/.local/share/bash-completion/completions/stackforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an authentication provider to a project.
    #[command(
        visible_alias = "auth",
        about = "Add authentication to a project",
        after_help = "EXAMPLES:\n\
            \x20 stackforge add-auth better-auth -f next --backend express -d postgres --orm drizzle\n\
            \x20 stackforge add-auth lucia -f sveltekit -d sqlite --skip-install\n\
            \x20 stackforge add-auth auth0 -f next --dry-run"
    )]
    AddAuth(AddAuthArgs),

    /// List available auth providers.
    #[command(
        visible_alias = "ls",
        about = "List auth providers",
        after_help = "EXAMPLES:\n\
            \x20 stackforge list\n\
            \x20 stackforge list --framework vue\n\
            \x20 stackforge list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stackforge init           # platform config dir\n\
            \x20 stackforge init --local   # .stackforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackforge completions bash > ~/.local/share/bash-completion/completions/stackforge\n\
            \x20 stackforge completions zsh  > ~/.zfunc/_stackforge\n\
            \x20 stackforge completions fish > ~/.config/fish/completions/stackforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the loaded configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackforge config get defaults.package_manager\n\
            \x20 stackforge config list\n\
            \x20 stackforge config path"
    )]
    Config(ConfigCommands),
}

// ── add-auth ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddAuthArgs {
    /// Provider id, e.g. `clerk`, `auth.js`, `better-auth`.
    #[arg(value_name = "PROVIDER", help = "Auth provider id (see `stackforge list`)")]
    pub provider: String,

    /// Project directory. Relative paths resolve against the CWD.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub path: PathBuf,

    /// Project name. Defaults to the directory name.
    #[arg(long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Frontend framework (next, react, remix, vue, nuxt, sveltekit, astro, solid-start, express, hono, fastify, nestjs)"
    )]
    pub framework: Option<Framework>,

    #[arg(
        long = "backend",
        value_name = "BACKEND",
        help = "Separate backend service (none, next-api, express, hono, fastify, nestjs)"
    )]
    pub backend: Option<Backend>,

    #[arg(
        short = 'd',
        long = "database",
        value_name = "DATABASE",
        help = "Database (none, postgres, mysql, sqlite, mongodb, supabase, neon, planetscale, turso)"
    )]
    pub database: Option<Database>,

    #[arg(
        long = "orm",
        value_name = "ORM",
        help = "ORM (none, prisma, drizzle, mongoose)"
    )]
    pub orm: Option<Orm>,

    #[arg(
        long = "styling",
        value_name = "STYLING",
        help = "Styling (tailwind, css-modules, sass, styled-components, none)"
    )]
    pub styling: Option<Styling>,

    /// Generate for a JavaScript project instead of TypeScript.
    #[arg(long = "javascript", help = "Project uses JavaScript, not TypeScript")]
    pub javascript: bool,

    #[arg(
        long = "package-manager",
        visible_alias = "pm",
        value_name = "PM",
        help = "Package manager (npm, pnpm, yarn, bun)"
    )]
    pub package_manager: Option<PackageManager>,

    /// Write fixed development placeholders instead of random secrets.
    #[arg(
        long = "insecure-secrets",
        help = "Use well-known placeholder secrets instead of random ones"
    )]
    pub insecure_secrets: bool,

    #[arg(long = "skip-install", help = "Do not run the package manager")]
    pub skip_install: bool,

    /// Show the plan without touching the project.
    #[arg(long = "dry-run", help = "Show what would happen without writing")]
    pub dry_run: bool,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[arg(
        long = "templates",
        value_name = "DIR",
        env = "STACKFORGE_TEMPLATES",
        help = "Template root directory"
    )]
    pub templates: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only providers that support this framework.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Filter by supported framework"
    )]
    pub framework: Option<Framework>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.stackforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.database`.
        key: String,
    },
    /// Print all configuration values as TOML.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
