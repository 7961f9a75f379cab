//! Consumers of finished runs.

use crate::series::TimeSeries;

/// Something that renders or exports a finished [`TimeSeries`].
///
/// The simulation never calls a sink itself; the caller of [`crate::run`]
/// decides where the result goes.
pub trait TimeSeriesSink {
    type Error;

    fn consume(&mut self, series: &TimeSeries) -> Result<(), Self::Error>;
}
