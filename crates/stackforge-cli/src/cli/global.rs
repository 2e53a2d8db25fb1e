//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// More log output on stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// `NO_COLOR` with any value other than empty, `0`, `false`, `no` or
    /// `off` counts as set.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from FILE instead of the default locations
    #[arg(short, long, global = true, value_name = "FILE", env = "STACKFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t,
        env = "STACKFORGE_OUTPUT_FORMAT"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise
    #[default]
    Auto,
    /// Colors, symbols and a spinner
    Human,
    /// Uncolored text
    Plain,
    /// A single JSON document
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; flags use clap's parser.
    pub fn parse_config(s: &str) -> Option<Self> {
        Self::from_str(s, true).ok()
    }
}
