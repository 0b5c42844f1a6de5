//! Normalization of selected feature vectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::select::ValueRange;

/// How selected vectors are scaled before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Values pass through untouched.
    Raw,
    /// Each vector is scaled by its own min and max.
    SelfScaled,
    /// Every vector is scaled by the scene-global min and max.
    GlobalRange,
}

impl NormalizationMode {
    /// Every recognized mode, for help texts and validation messages.
    pub const ALL: [Self; 3] = [Self::Raw, Self::SelfScaled, Self::GlobalRange];

    /// Canonical name used on the command line and in output file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::SelfScaled => "self",
            Self::GlobalRange => "range",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalizationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(Self::Raw),
            "self" => Ok(Self::SelfScaled),
            "range" => Ok(Self::GlobalRange),
            other => Err(Error::Config(format!(
                "unrecognized normalization mode: {other} (expected raw, self, or range)"
            ))),
        }
    }
}

/// Component window, clamped so any `(begin, end)` yields a valid slice.
#[must_use]
pub fn slice_window(values: &[f64], window: (usize, usize)) -> &[f64] {
    let begin = window.0.min(values.len());
    let end = window.1.min(values.len()).max(begin);
    &values[begin..end]
}

/// Scale a vector into `[0, 1]` by its own extremes.
///
/// A constant or empty vector has no spread to scale by and maps to all
/// zeros rather than dividing by zero.
#[must_use]
pub fn normalize_unit(values: &[f64]) -> Vec<f64> {
    let mut range = ValueRange::new();
    range.observe(values);
    normalize_with_range(values, range.min, range.max)
}

/// Scale a vector by an externally tracked `[min, max]`.
#[must_use]
pub fn normalize_with_range(values: &[f64], min: f64, max: f64) -> Vec<f64> {
    if !(max > min) {
        return vec![0.0; values.len()];
    }
    let span = max - min;
    values.iter().map(|v| (v - min) / span).collect()
}

/// Apply `mode` to one selected vector.
#[must_use]
pub fn apply(mode: NormalizationMode, values: &[f64], range: ValueRange) -> Vec<f64> {
    match mode {
        NormalizationMode::Raw => values.to_vec(),
        NormalizationMode::SelfScaled => normalize_unit(values),
        NormalizationMode::GlobalRange => normalize_with_range(values, range.min, range.max),
    }
}
