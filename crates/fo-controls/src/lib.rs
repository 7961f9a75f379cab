//! Reference signals and feedback controllers for firstorder.
//!
//! This crate holds the signal side of a simulation run: the reference
//! waveform the plant is asked to follow, and the controller that turns the
//! tracking error into a control effort.
//!
//! # Architecture
//!
//! - Signals are scalar `f64` samples on a fixed time grid
//! - Reference waveforms are pure functions of time (step, ramp)
//! - Controllers are selected once per run as a closed variant
//!   (none, P, PI, PID) and carry their own per-run state
//!
//! Labels such as `"pid"` or `"ramp"` are only accepted at the boundary
//! through the `from_label` constructors; everything past that point works
//! on the typed variants.

pub mod controller;
pub mod error;
pub mod reference;

pub use controller::{Controller, ControllerGains, ControllerKind, ControllerState};
pub use error::{ControlError, ControlResult};
pub use reference::{InputKind, generate, generate_into};
