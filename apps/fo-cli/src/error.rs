//! Error types for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl From<fo_sim::SimError> for CliError {
    fn from(err: fo_sim::SimError) -> Self {
        CliError::Simulation(err.to_string())
    }
}

impl From<fo_controls::ControlError> for CliError {
    fn from(err: fo_controls::ControlError) -> Self {
        CliError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Export(err.to_string())
    }
}
