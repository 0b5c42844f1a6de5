//! Which images make it into a curve, and the running value range.
//!
//! Retention is the union of two predicates: the periodic step/range filter
//! and the one-shot threshold crossing. The crossing can admit an image the
//! step filter would have dropped, so both are evaluated for every image.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Data selection parameters for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Component window `(begin, end)` applied to each feature vector,
    /// half-open and clamped to the vector length.
    pub data_window: (usize, usize),
    /// Inclusive quality-index range `(begin, end)` an image must fall in.
    pub index_range: (u32, u32),
    /// Keep images whose quality index is a multiple of this step.
    pub step: u32,
    /// Apply the component window before min/max tracking instead of after.
    pub slice_before_tracking: bool,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            data_window: (0, 200),
            index_range: (0, 900),
            step: 10,
            slice_before_tracking: false,
        }
    }
}

impl SelectionCriteria {
    /// Reject configurations that could never select anything sensible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero step or an inverted range.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::Config("step must be at least 1".to_string()));
        }
        if self.index_range.0 > self.index_range.1 {
            return Err(Error::Config(format!(
                "index range begin {} exceeds end {}",
                self.index_range.0, self.index_range.1
            )));
        }
        if self.data_window.0 > self.data_window.1 {
            return Err(Error::Config(format!(
                "data window begin {} exceeds end {}",
                self.data_window.0, self.data_window.1
            )));
        }
        Ok(())
    }

    /// Periodic filter: quality on the step grid and inside the range.
    #[must_use]
    pub fn retains(&self, quality: u32) -> bool {
        quality % self.step == 0
            && quality >= self.index_range.0
            && quality <= self.index_range.1
    }
}

/// Detects the first image whose quality reaches the scene threshold mean.
///
/// Latches after the first hit so ties and later images report `false`.
#[derive(Debug)]
pub struct ThresholdTracker {
    mean: f64,
    crossed: bool,
}

impl ThresholdTracker {
    #[must_use]
    pub fn new(mean: f64) -> Self {
        Self {
            mean,
            crossed: false,
        }
    }

    /// Feed the next quality index in encounter order.
    ///
    /// Returns `true` exactly once, for the first quality greater than or
    /// equal to the mean.
    pub fn record(&mut self, quality: u32) -> bool {
        if self.crossed || f64::from(quality) < self.mean {
            return false;
        }
        self.crossed = true;
        true
    }

    #[must_use]
    pub fn has_crossed(&self) -> bool {
        self.crossed
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

/// Running min/max over every observed feature value of a scene.
///
/// Each bound folds independently; a fresh range is degenerate until the
/// first observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn observe(&mut self, values: &[f64]) {
        for &v in values {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// True when the range cannot scale anything: no observations yet, or
    /// every observed value was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new()
    }
}
