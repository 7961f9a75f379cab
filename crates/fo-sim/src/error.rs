//! Error types for simulation operations.

use fo_controls::ControlError;
use fo_core::CoreError;
use thiserror::Error;

/// Errors encountered while setting up or running a simulation.
///
/// Every configuration problem surfaces as [`SimError::InvalidConfig`] before
/// the step loop starts. A diverging response is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        SimError::InvalidConfig { what: what.into() }
    }
}

impl From<ControlError> for SimError {
    fn from(e: ControlError) -> Self {
        SimError::InvalidConfig {
            what: e.to_string(),
        }
    }
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Invariant { what } => SimError::Invariant { what },
            other => SimError::InvalidConfig {
                what: other.to_string(),
            },
        }
    }
}
