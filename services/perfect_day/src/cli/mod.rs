//! services/perfect_day/src/cli/mod.rs
//!
//! The `perfect-day` terminal client. Commands work directly against the
//! file store; the REST server is not involved.

pub mod args;
pub mod commands;
pub mod config;
pub mod prompt;
pub mod render;

pub use args::{parse_args, Command, SearchArgs};
pub use commands::CliContext;
pub use config::CliConfig;
pub use prompt::Prompt;

use crate::config::ConfigError;
use perfect_day_core::ports::PortError;

/// Everything a terminal command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad arguments or an unusable answer to a prompt.
    #[error("{0}")]
    Usage(String),

    #[error("Please login first using 'perfect-day login'")]
    NotLoggedIn,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Port(#[from] PortError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
