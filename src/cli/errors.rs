//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::io;

use thiserror::Error;

use crate::http_server::ConfigError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or override problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Runtime or listener failed to start, or the server stopped with an error
    #[error("Server failed: {0}")]
    Server(#[from] io::Error),
}
