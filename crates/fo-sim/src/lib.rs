//! Time-response simulation of a first-order plant.
//!
//! Provides:
//! - Fixed time grid construction
//! - First-order plant `dy/dt = (-y + K*u_c) / tau`
//! - Fixed-step forward Euler integrator
//! - Open-loop and P/PI/PID closed-loop runs
//! - Output series and the sink trait used to hand it to a front end

pub mod config;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod model;
pub mod plant;
pub mod series;
pub mod sim;
pub mod sink;

// Re-exports for public API
pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use fo_controls::{ControllerKind, InputKind};
pub use grid::TimeGrid;
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use plant::FirstOrderPlant;
pub use series::{Sample, TimeSeries};
pub use sim::run;
pub use sink::TimeSeriesSink;
