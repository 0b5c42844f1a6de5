//! Human-perceived quality threshold table.
//!
//! The threshold resource is a semicolon-delimited text file with one record
//! per scene:
//!
//! ```text
//! scene_name;threshold_1;threshold_2;...;threshold_N;
//! ```
//!
//! Each threshold is the quality index beyond which one zone of the scene is
//! judged visually acceptable; the trailing `;` leaves an empty field that is
//! discarded. Scene names listed in an exclusion set are dropped while the
//! table is built; [`DEFAULT_EXCLUDED_SCENES`] names the scene the reference
//! data always skips, so the omission is explicit rather than silent.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Scene names dropped from every table loaded with [`ThresholdTable::load`].
///
/// The reference data set ships subjective scores for this scene but the
/// curve tooling never consumes them; callers needing a different policy use
/// [`ThresholdTable::load_with_exclusions`].
pub const DEFAULT_EXCLUDED_SCENES: &[&str] = &["50_shades_of_grey"];

/// Per-scene human threshold sets, one integer threshold per zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdTable {
    thresholds: BTreeMap<String, Vec<u32>>,
}

impl ThresholdTable {
    /// Load a threshold table, applying [`DEFAULT_EXCLUDED_SCENES`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_exclusions(path, DEFAULT_EXCLUDED_SCENES)
    }

    /// Load a threshold table with an explicit scene exclusion set.
    pub fn load_with_exclusions(path: impl AsRef<Path>, exclusions: &[&str]) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file, exclusions)
    }

    /// Parse a threshold table from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThresholdParse`] for a record with an empty scene
    /// name, a non-integer threshold, or no thresholds at all (the mean would
    /// be undefined). Whitespace-only lines are skipped.
    pub fn from_reader<R: Read>(reader: R, exclusions: &[&str]) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut thresholds = BTreeMap::new();

        for (idx, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| Error::ThresholdParse {
                line: e.position().map_or(idx + 1, |p| p.line() as usize),
                reason: e.to_string(),
            })?;
            // The reader skips blank lines, so take the file line from its
            // position rather than the record ordinal.
            let line = record.position().map_or(idx + 1, |p| p.line() as usize);

            let mut fields: Vec<&str> = record.iter().map(str::trim).collect();
            // Drop the empty field produced by the trailing delimiter.
            if fields.last().is_some_and(|f| f.is_empty()) {
                fields.pop();
            }
            if fields.is_empty() {
                continue;
            }

            let scene = fields[0];
            if scene.is_empty() {
                return Err(Error::ThresholdParse {
                    line,
                    reason: "missing scene name field".to_string(),
                });
            }

            let values = fields[1..]
                .iter()
                .map(|v| {
                    v.parse::<u32>().map_err(|_| Error::ThresholdParse {
                        line,
                        reason: format!("non-integer threshold {v:?} for scene {scene:?}"),
                    })
                })
                .collect::<Result<Vec<u32>>>()?;

            if values.is_empty() {
                return Err(Error::ThresholdParse {
                    line,
                    reason: format!("scene {scene:?} has no thresholds"),
                });
            }

            if exclusions.contains(&scene) {
                log::debug!("excluding scene {scene:?} from the threshold table");
                continue;
            }

            thresholds.insert(scene.to_string(), values);
        }

        Ok(Self { thresholds })
    }

    /// Mean of a scene's per-zone thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownScene`] if the scene was excluded or never
    /// present in the resource.
    pub fn mean_for(&self, scene: &str) -> Result<f64> {
        let values = self
            .thresholds
            .get(scene)
            .ok_or_else(|| Error::UnknownScene(scene.to_string()))?;
        Ok(values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64)
    }

    /// Threshold set for a scene, one value per zone.
    #[must_use]
    pub fn get(&self, scene: &str) -> Option<&[u32]> {
        self.thresholds.get(scene).map(Vec::as_slice)
    }

    /// Number of zones recorded for a scene.
    #[must_use]
    pub fn zone_count(&self, scene: &str) -> Option<usize> {
        self.thresholds.get(scene).map(Vec::len)
    }

    /// Scene names present in the table, in sorted order.
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.thresholds.keys().map(String::as_str)
    }

    /// Number of scenes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether the table holds no scenes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Display name of a scene zone, zero-padded to two digits (`zone00`...).
#[must_use]
pub fn zone_name(index: usize) -> String {
    format!("zone{index:02}")
}
