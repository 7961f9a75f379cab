//! Simulation output series.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Sampled response of one run: time, reference and plant output.
///
/// Non-finite samples serialize as the strings `"NaN"`, `"inf"` and `"-inf"`
/// so that a diverged run survives formats without a non-finite number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Time points (seconds)
    #[serde(with = "float_seq")]
    pub t: Vec<f64>,
    /// Reference input u(t)
    #[serde(with = "float_seq")]
    pub u: Vec<f64>,
    /// Plant output y(t)
    #[serde(with = "float_seq")]
    pub y: Vec<f64>,
}

/// One row of a [`TimeSeries`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub u: f64,
    pub y: f64,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.t
            .iter()
            .zip(&self.u)
            .zip(&self.y)
            .map(|((&t, &u), &y)| Sample { t, u, y })
    }

    pub fn final_output(&self) -> Option<f64> {
        self.y.last().copied()
    }

    /// Largest |y| over the run. NaN samples are skipped.
    pub fn peak_output(&self) -> Option<f64> {
        self.y
            .iter()
            .map(|y| y.abs())
            .filter(|y| !y.is_nan())
            .reduce(f64::max)
    }

    /// Time range covered, `(t[0], t[-1])`.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((*self.t.first()?, *self.t.last()?))
    }

    /// Equal lengths, `t[0] == 0`, strictly increasing `t`.
    pub fn check_invariants(&self) -> SimResult<()> {
        if self.u.len() != self.t.len() || self.y.len() != self.t.len() {
            return Err(SimError::Invariant {
                what: "t, u and y must have equal length",
            });
        }
        match self.t.first() {
            Some(&t0) if t0 == 0.0 => {}
            _ => {
                return Err(SimError::Invariant {
                    what: "series must start at t = 0",
                });
            }
        }
        if self.t.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SimError::Invariant {
                what: "time must be strictly increasing",
            });
        }
        Ok(())
    }
}

mod float_seq {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};

    const NAN: &str = "NaN";
    const INF: &str = "inf";
    const NEG_INF: &str = "-inf";

    struct Encode(f64);

    impl Serialize for Encode {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let v = self.0;
            if v.is_finite() {
                serializer.serialize_f64(v)
            } else if v.is_nan() {
                serializer.serialize_str(NAN)
            } else if v > 0.0 {
                serializer.serialize_str(INF)
            } else {
                serializer.serialize_str(NEG_INF)
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|&v| Encode(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Encoded>::deserialize(deserializer)?
            .into_iter()
            .map(|e| match e {
                Encoded::Number(v) => Ok(v),
                Encoded::Text(text) => match text.as_str() {
                    NAN => Ok(f64::NAN),
                    INF => Ok(f64::INFINITY),
                    NEG_INF => Ok(f64::NEG_INFINITY),
                    other => Err(de::Error::custom(format!(
                        "expected a number, \"{NAN}\", \"{INF}\" or \"{NEG_INF}\", found \"{other}\""
                    ))),
                },
            })
            .collect()
    }
}
