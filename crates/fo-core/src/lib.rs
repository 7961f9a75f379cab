//! fo-core: shared foundation for the firstorder workspace.
//!
//! Contains:
//! - units (uom time type + constructors)
//! - numeric (Real + tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
