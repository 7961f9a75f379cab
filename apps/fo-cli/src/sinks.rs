//! Output sinks for finished runs.

use std::io::Write;

use fo_sim::{TimeSeries, TimeSeriesSink};

use crate::error::CliError;

/// `time_s,u,y` rows with a header line.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TimeSeriesSink for CsvSink<W> {
    type Error = CliError;

    fn consume(&mut self, series: &TimeSeries) -> Result<(), CliError> {
        writeln!(self.writer, "time_s,u,y")?;
        for s in series.samples() {
            writeln!(self.writer, "{},{},{}", s.t, s.u, s.y)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// The whole series as one JSON object with `t`, `u` and `y` arrays.
///
/// Non-finite samples are written as `"NaN"`, `"inf"` or `"-inf"`.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TimeSeriesSink for JsonSink<W> {
    type Error = CliError;

    fn consume(&mut self, series: &TimeSeries) -> Result<(), CliError> {
        serde_json::to_writer_pretty(&mut self.writer, series)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Short human-readable report.
pub struct SummarySink<W: Write> {
    writer: W,
}

impl<W: Write> SummarySink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TimeSeriesSink for SummarySink<W> {
    type Error = CliError;

    fn consume(&mut self, series: &TimeSeries) -> Result<(), CliError> {
        writeln!(self.writer, "Run Summary:")?;
        writeln!(self.writer, "  Time points: {}", series.len())?;
        if let Some((t0, t1)) = series.time_range() {
            writeln!(self.writer, "  Time range: {:.3} - {:.3} s", t0, t1)?;
        }
        if let Some(y) = series.final_output() {
            writeln!(self.writer, "  Final output: {:.6}", y)?;
        }
        if let Some(peak) = series.peak_output() {
            writeln!(self.writer, "  Peak |y|: {:.6}", peak)?;
        }
        if series.y.iter().any(|y| !y.is_finite()) {
            writeln!(self.writer, "  Output overflowed (non-finite samples)")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
