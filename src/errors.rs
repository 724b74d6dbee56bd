use std::result::Result as StdResult;

use smartspend_config::ConfigError;
use smartspend_core::CoreError;
use thiserror::Error;

/// Unified error type for the app layer.
#[derive(Error, Debug)]
pub enum SmartSpendError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Onboarding not finished (current step: {0}). Use `start`, `signup`, and `setup` first.")]
    NotOnDashboard(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SmartSpendError>;

/// User-facing shell error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] SmartSpendError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::App(SmartSpendError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::App(SmartSpendError::from(err))
    }
}
