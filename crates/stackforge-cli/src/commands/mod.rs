//! One module per subcommand.

pub mod add_auth;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
