//! Terminal front-end: command shell and the display surface it drives.

pub mod output;
pub mod render;
pub mod shell;

use thiserror::Error;

use crate::errors::TrackerError;

pub use shell::{run_cli, CliMode, SCRIPT_ENV};

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
