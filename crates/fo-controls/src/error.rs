//! Error types for reference and controller operations.

use fo_core::CoreError;
use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in reference generation or controller updates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Reference waveform label not recognized.
    #[error("Unknown input kind: {label:?} (expected \"step\" or \"ramp\")")]
    UnknownInputKind { label: String },

    /// Controller label not recognized.
    #[error("Unknown controller kind: {label:?} (expected \"none\", \"p\", \"pi\" or \"pid\")")]
    UnknownControllerKind { label: String },

    /// A gain the selected controller uses was not supplied.
    #[error("Controller {controller} requires gain {gain}")]
    MissingGain {
        controller: &'static str,
        gain: &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
