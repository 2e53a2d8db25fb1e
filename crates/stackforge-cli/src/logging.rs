//! Tracing subscriber setup for the binary.
//!
//! The core and adapter crates emit spans and events; this module is the
//! only place a subscriber is installed. Events go to stderr so stdout
//! stays clean for reports and JSON documents.
//!
//! `-q` logs errors only, no flag logs warnings, and each `-v` steps through
//! info, debug and trace. A set `RUST_LOG` replaces the computed filter.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events pass the computed filter.
const WORKSPACE_TARGETS: [&str; 3] = ["stackforge", "stackforge_core", "stackforge_adapters"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Error;
        }
        match args.verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    fn directives(self) -> String {
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber.
///
/// With `--output-format json` the events are JSON lines as well, so a
/// caller piping both streams gets machine-readable output on each.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let verbosity = Verbosity::from_args(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let layer = if args.output_format == OutputFormat::Json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(verbosity >= Verbosity::Debug)
            .with_ansi(!args.no_color && std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}
