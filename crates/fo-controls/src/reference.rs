//! Reference (setpoint) waveforms.
//!
//! A reference is evaluated on the run's time grid before the step loop
//! starts, so generation is a pure function of the sample times.

use fo_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Reference waveform and its single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputKind {
    /// Constant `amplitude` from t = 0.
    Step { amplitude: f64 },
    /// `slope * t`.
    Ramp { slope: f64 },
}

impl Default for InputKind {
    fn default() -> Self {
        Self::Step { amplitude: 1.0 }
    }
}

impl InputKind {
    /// Build a waveform from its display label and parameter.
    ///
    /// Labels are matched case-insensitively after trimming. The parameter is
    /// the amplitude for `"step"` and the slope for `"ramp"`.
    pub fn from_label(label: &str, parameter: f64) -> ControlResult<Self> {
        let kind = match label.trim().to_ascii_lowercase().as_str() {
            "step" => Self::Step {
                amplitude: parameter,
            },
            "ramp" => Self::Ramp { slope: parameter },
            _ => {
                return Err(ControlError::UnknownInputKind {
                    label: label.to_string(),
                });
            }
        };
        kind.validate()?;
        Ok(kind)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Step { .. } => "step",
            Self::Ramp { .. } => "ramp",
        }
    }

    /// Amplitude or slope, depending on the waveform.
    pub fn parameter(&self) -> f64 {
        match *self {
            Self::Step { amplitude } => amplitude,
            Self::Ramp { slope } => slope,
        }
    }

    /// Reject non-finite parameters.
    pub fn validate(&self) -> ControlResult<()> {
        match *self {
            Self::Step { amplitude } => ensure_finite(amplitude, "step amplitude")?,
            Self::Ramp { slope } => ensure_finite(slope, "ramp slope")?,
        };
        Ok(())
    }

    /// Reference value at time `t`.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        match *self {
            Self::Step { amplitude } => amplitude,
            Self::Ramp { slope } => slope * t,
        }
    }
}

/// Evaluate `kind` at every sample of `t`.
///
/// The returned sequence always has the same length as `t`.
pub fn generate(t: &[f64], kind: &InputKind) -> Vec<f64> {
    let mut u = Vec::with_capacity(t.len());
    generate_into(t, kind, &mut u);
    u
}

/// Like [`generate`], appending to a caller-provided buffer.
pub fn generate_into(t: &[f64], kind: &InputKind, out: &mut Vec<f64>) {
    out.extend(t.iter().map(|&ti| kind.value_at(ti)));
}
