//! Feedback controller implementations.
//!
//! Provides the controller variants a run can select:
//! - **None**: open loop, the plant sees the reference directly
//! - **P**: proportional
//! - **PI**: proportional-integral (forward rectangle integral)
//! - **PID**: PI plus backward-difference derivative
//!
//! The integral term is not clamped and the derivative term is not filtered,
//! so sustained error winds the integral up and reference discontinuities
//! produce a derivative kick.

use fo_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Controller variant with the gains that variant uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControllerKind {
    /// Open loop.
    #[default]
    None,
    /// Proportional.
    P { kp: f64 },
    /// Proportional-integral.
    Pi { kp: f64, ki: f64 },
    /// Proportional-integral-derivative.
    Pid { kp: f64, ki: f64, kd: f64 },
}

/// Loosely specified gains, as collected from a form or command line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerGains {
    pub kp: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

impl ControllerKind {
    /// Build a controller variant from its display label and gains.
    ///
    /// Every gain the selected variant uses must be present; unused gains are
    /// ignored.
    pub fn from_label(label: &str, gains: ControllerGains) -> ControlResult<Self> {
        let kind = match label.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "p" => Self::P {
                kp: require(gains.kp, "P", "kp")?,
            },
            "pi" => Self::Pi {
                kp: require(gains.kp, "PI", "kp")?,
                ki: require(gains.ki, "PI", "ki")?,
            },
            "pid" => Self::Pid {
                kp: require(gains.kp, "PID", "kp")?,
                ki: require(gains.ki, "PID", "ki")?,
                kd: require(gains.kd, "PID", "kd")?,
            },
            _ => {
                return Err(ControlError::UnknownControllerKind {
                    label: label.to_string(),
                });
            }
        };
        kind.validate()?;
        Ok(kind)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::P { .. } => "p",
            Self::Pi { .. } => "pi",
            Self::Pid { .. } => "pid",
        }
    }

    /// True for the open-loop variant.
    pub fn is_bypass(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Reject non-finite gains.
    pub fn validate(&self) -> ControlResult<()> {
        match *self {
            Self::None => {}
            Self::P { kp } => {
                ensure_finite(kp, "kp")?;
            }
            Self::Pi { kp, ki } => {
                ensure_finite(kp, "kp")?;
                ensure_finite(ki, "ki")?;
            }
            Self::Pid { kp, ki, kd } => {
                ensure_finite(kp, "kp")?;
                ensure_finite(ki, "ki")?;
                ensure_finite(kd, "kd")?;
            }
        }
        Ok(())
    }
}

fn require(gain: Option<f64>, controller: &'static str, name: &'static str) -> ControlResult<f64> {
    gain.ok_or(ControlError::MissingGain {
        controller,
        gain: name,
    })
}

/// Controller memory for one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    /// Integral accumulator.
    pub integral: f64,
    /// Error seen on the previous step, for the backward difference.
    pub prev_error: f64,
}

/// A controller variant bound to its per-run state.
///
/// # Example
///
/// ```
/// use fo_controls::{Controller, ControllerKind};
///
/// let mut pi = Controller::new(ControllerKind::Pi { kp: 1.0, ki: 2.0 });
/// let u1 = pi.step(1.0, 0.5).unwrap();
/// // integral = 0.5, output = 1.0 * 1.0 + 2.0 * 0.5
/// assert_eq!(u1, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    kind: ControllerKind,
    state: ControllerState,
}

impl Controller {
    /// Create a controller with zeroed state.
    pub fn new(kind: ControllerKind) -> Self {
        Self {
            kind,
            state: ControllerState::default(),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn integral(&self) -> f64 {
        self.state.integral
    }

    /// Clear the integral accumulator and the previous-error memory.
    pub fn reset(&mut self) {
        self.state = ControllerState::default();
    }

    /// Convert an error sample into a control effort.
    ///
    /// For [`ControllerKind::None`] there are no gains to apply and the error
    /// passes through unchanged; open-loop runs go through
    /// [`Controller::effort`] instead, which feeds the reference itself.
    ///
    /// `prev_error` is updated on every call, whatever the variant.
    pub fn step(&mut self, error: f64, dt: f64) -> ControlResult<f64> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "dt must be positive",
            });
        }

        let output = match self.kind {
            ControllerKind::None => error,
            ControllerKind::P { kp } => kp * error,
            ControllerKind::Pi { kp, ki } => {
                self.state.integral += error * dt;
                kp * error + ki * self.state.integral
            }
            ControllerKind::Pid { kp, ki, kd } => {
                self.state.integral += error * dt;
                let derivative = (error - self.state.prev_error) / dt;
                kp * error + ki * self.state.integral + kd * derivative
            }
        };

        self.state.prev_error = error;
        Ok(output)
    }

    /// Control effort for one loop iteration.
    ///
    /// Computes `error = reference - measured`. In open loop the effort is
    /// the reference sample and the error is only recorded as `prev_error`;
    /// otherwise the effort is [`Controller::step`] of the error.
    pub fn effort(&mut self, reference: f64, measured: f64, dt: f64) -> ControlResult<f64> {
        let error = reference - measured;
        if self.kind.is_bypass() {
            self.step(error, dt)?;
            Ok(reference)
        } else {
            self.step(error, dt)
        }
    }
}
