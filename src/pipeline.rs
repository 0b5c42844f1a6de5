//! Curve extraction pipeline with callback-based image loading.
//!
//! This module provides [`Pipeline`], the main entry point for turning a
//! scene directory into selected, normalized feature curves. Callers supply
//! a loader callback (and optionally a feature extractor), and the pipeline
//! handles scanning, selection, threshold detection, and report output.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{self, ExtractFn, FeatureKind, FeatureVector};
use crate::normalize::{self, NormalizationMode, slice_window};
use crate::raster::ImageData;
use crate::scene::Scene;
use crate::select::{SelectionCriteria, ThresholdTracker, ValueRange};
use crate::thresholds::ThresholdTable;

/// Substring a file name must contain to count as a rendered image.
pub const DEFAULT_EXTENSION_MARKER: &str = ".png";

/// Image loading callback type.
///
/// Takes a file path, returns decoded pixel data.
pub type LoadImageFn = Box<dyn Fn(&Path) -> Result<ImageData> + Send + Sync>;

/// Progress callback type, called as `(images_done, images_total)`.
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Configuration for a curve pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Feature computed per image.
    pub feature: FeatureKind,

    /// Normalization applied to selected vectors.
    pub mode: NormalizationMode,

    /// Image selection and window parameters.
    pub criteria: SelectionCriteria,

    /// File-name substring identifying rendered images.
    pub extension_marker: String,

    /// Extract features across worker threads.
    pub parallel: bool,
}

impl PipelineConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Reject configurations that cannot select anything.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for invalid criteria or an empty
    /// extension marker, which would match every file in the directory.
    pub fn validate(&self) -> Result<()> {
        self.criteria.validate()?;
        if self.extension_marker.is_empty() {
            return Err(Error::Config(
                "extension marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    feature: Option<FeatureKind>,
    mode: Option<NormalizationMode>,
    criteria: Option<SelectionCriteria>,
    extension_marker: Option<String>,
    parallel: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the feature to compute.
    #[must_use]
    pub fn feature(mut self, feature: FeatureKind) -> Self {
        self.feature = Some(feature);
        self
    }

    /// Set the normalization mode.
    #[must_use]
    pub fn mode(mut self, mode: NormalizationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the selection criteria.
    #[must_use]
    pub fn criteria(mut self, criteria: SelectionCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Set the file-name marker for rendered images.
    #[must_use]
    pub fn extension_marker(mut self, marker: impl Into<String>) -> Self {
        self.extension_marker = Some(marker.into());
        self
    }

    /// Enable or disable parallel feature extraction.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Build the configuration, falling back to defaults for unset fields.
    #[must_use]
    pub fn build(self) -> PipelineConfig {
        PipelineConfig {
            feature: self.feature.unwrap_or(FeatureKind::Svd),
            mode: self.mode.unwrap_or(NormalizationMode::Raw),
            criteria: self.criteria.unwrap_or_default(),
            extension_marker: self
                .extension_marker
                .unwrap_or_else(|| DEFAULT_EXTENSION_MARKER.to_string()),
            parallel: self.parallel.unwrap_or(true),
        }
    }
}

/// One selected image on the curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSample {
    /// Sample-count token from the file name, zero padding preserved.
    pub label: String,

    /// Quality index parsed from the label.
    pub quality: u32,

    /// Feature values after windowing and normalization.
    pub values: Vec<f64>,

    /// True for the sample where the scene first reached its threshold mean.
    pub is_threshold: bool,
}

/// Output of one pipeline run over one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneCurves {
    /// Scene name, taken from the directory.
    pub scene: String,

    /// Feature the curves were computed from.
    pub feature: FeatureKind,

    /// Normalization applied to the values.
    pub mode: NormalizationMode,

    /// Selection parameters the run used.
    pub criteria: SelectionCriteria,

    /// Mean of the scene's zone thresholds.
    pub threshold_mean: f64,

    /// Min/max observed across every scanned image, selected or not.
    pub value_range: ValueRange,

    /// Selected samples in render order.
    pub samples: Vec<CurveSample>,

    /// When this run finished.
    #[serde(with = "chrono_serde")]
    pub generated: chrono::DateTime<chrono::Utc>,
}

impl SceneCurves {
    /// The sample that crossed the threshold mean, if any did.
    #[must_use]
    pub fn crossing(&self) -> Option<&CurveSample> {
        self.samples.iter().find(|s| s.is_threshold)
    }

    /// Base file name shared by every artifact of this run.
    ///
    /// The trailing digit records whether the component window was applied
    /// before tracking, so runs differing only in that flag do not collide.
    #[must_use]
    pub fn base_name(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.scene,
            self.feature,
            self.criteria.step,
            self.mode,
            u8::from(self.criteria.slice_before_tracking)
        )
    }

    /// File name for the rendered chart.
    #[must_use]
    pub fn plot_file_name(&self) -> String {
        format!("{}.svg", self.base_name())
    }

    /// Write the full run as pretty-printed JSON into `dir`.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", self.base_name()));
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Write the samples in long form (one row per curve value) into `dir`.
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.csv", self.base_name()));
        let mut wtr = csv::Writer::from_path(&path)?;

        wtr.write_record(["scene", "label", "quality", "component", "value", "is_threshold"])?;

        for sample in &self.samples {
            for (component, value) in sample.values.iter().enumerate() {
                wtr.write_record([
                    &self.scene,
                    &sample.label,
                    &sample.quality.to_string(),
                    &component.to_string(),
                    &format!("{value:.8}"),
                    &u8::from(sample.is_threshold).to_string(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(path)
    }
}

/// Curve extraction pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use scene_curves::{Pipeline, PipelineConfig, ThresholdTable};
///
/// let config = PipelineConfig::builder()
///     .feature("svd".parse()?)
///     .mode("range".parse()?)
///     .build();
///
/// let pipeline = Pipeline::with_default_loader(config);
/// let thresholds = ThresholdTable::load("thresholds.csv")?;
/// let curves = pipeline.run_scene("scenes/Cuisine01".as_ref(), &thresholds)?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    loader: LoadImageFn,
    extractor: ExtractFn,
    progress: Option<ProgressFn>,
}

impl Pipeline {
    /// Create a pipeline with a caller-supplied image loader.
    #[must_use]
    pub fn new(config: PipelineConfig, loader: LoadImageFn) -> Self {
        Self {
            config,
            loader,
            extractor: features::default_extractor(),
            progress: None,
        }
    }

    /// Create a pipeline that decodes images from disk.
    #[cfg(feature = "image-load")]
    #[must_use]
    pub fn with_default_loader(config: PipelineConfig) -> Self {
        Self::new(config, crate::loader::default_loader())
    }

    /// Replace the feature extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ExtractFn) -> Self {
        self.extractor = extractor;
        self
    }

    /// Install a progress callback, invoked once per scanned image.
    #[must_use]
    pub fn on_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run the pipeline over one scene directory.
    ///
    /// Every image in the directory is loaded and reduced to a feature
    /// vector; selection and normalization then happen in render order.
    /// Any per-image failure aborts the whole scene so a partial curve is
    /// never produced.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, an unscannable directory, a scene
    /// absent from the threshold table, or any load/extraction failure.
    pub fn run_scene(&self, scene_dir: &Path, thresholds: &ThresholdTable) -> Result<SceneCurves> {
        self.config.validate()?;

        let scene = Scene::scan(scene_dir, &self.config.extension_marker)?;
        let mean = thresholds.mean_for(&scene.name)?;
        log::debug!(
            "{}: {} images, threshold mean {mean:.2}",
            scene.name,
            scene.images.len()
        );

        let mut vectors = self.extract_all(&scene)?;

        let criteria = &self.config.criteria;
        if criteria.slice_before_tracking {
            // The window narrows what the trackers see, so apply it first
            // and skip the post-selection slice.
            for vector in &mut vectors {
                *vector = slice_window(vector, criteria.data_window).to_vec();
            }
        }

        let total = scene.images.len();
        let mut tracker = ThresholdTracker::new(mean);
        let mut range = ValueRange::new();
        let mut selected: Vec<(usize, bool)> = Vec::new();

        for (i, (image, vector)) in scene.images.iter().zip(&vectors).enumerate() {
            range.observe(vector);

            let crossed = tracker.record(image.quality);
            if crossed {
                log::info!(
                    "{}: threshold mean {mean:.2} first reached at sample {}",
                    scene.name,
                    image.postfix
                );
            }
            if crossed || criteria.retains(image.quality) {
                selected.push((i, crossed));
            }

            if let Some(ref progress) = self.progress {
                progress(i + 1, total);
            }
        }

        let mut samples = Vec::with_capacity(selected.len());
        for (i, is_threshold) in selected {
            let image = &scene.images[i];
            let windowed: &[f64] = if criteria.slice_before_tracking {
                &vectors[i]
            } else {
                slice_window(&vectors[i], criteria.data_window)
            };
            samples.push(CurveSample {
                label: image.postfix.clone(),
                quality: image.quality,
                values: normalize::apply(self.config.mode, windowed, range),
                is_threshold,
            });
        }

        Ok(SceneCurves {
            scene: scene.name,
            feature: self.config.feature,
            mode: self.config.mode,
            criteria: criteria.clone(),
            threshold_mean: tracker.mean(),
            value_range: range,
            samples,
            generated: chrono::Utc::now(),
        })
    }

    /// Load and extract every image, preserving render order.
    fn extract_all(&self, scene: &Scene) -> Result<Vec<FeatureVector>> {
        let feature = self.config.feature;
        let compute = |path: &Path| -> Result<FeatureVector> {
            let image = (self.loader)(path)?;
            (self.extractor)(path, &image, feature)
        };

        if self.config.parallel {
            scene
                .images
                .par_iter()
                .map(|img| compute(&img.path))
                .collect()
        } else {
            scene.images.iter().map(|img| compute(&img.path)).collect()
        }
    }
}

// Timestamps serialize as RFC 3339 strings.
mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};

    use tempfile::TempDir;

    use crate::error::Error;
    use crate::quality::quality_index;

    const THRESHOLDS: &str = "Appart1opt02;20;30;40;\nCuisine01;10;14;\n";

    fn table() -> ThresholdTable {
        ThresholdTable::from_reader(THRESHOLDS.as_bytes(), &[]).unwrap()
    }

    fn scene_dir(name: &str, qualities: &[u32]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join(name);
        fs::create_dir(&scene).unwrap();
        for q in qualities {
            fs::write(scene.join(format!("{name}_{q:05}.png")), b"stub").unwrap();
        }
        dir
    }

    /// Loader that hands back a fixed 1x1 image; tests pair it with an
    /// extractor keyed on the file name instead of pixel content.
    fn stub_loader() -> LoadImageFn {
        Box::new(|_path| {
            Ok(ImageData::RgbSlice {
                data: vec![255, 255, 255],
                width: 1,
                height: 1,
            })
        })
    }

    /// Extractor producing `[q, q / 2]` for quality index `q`.
    fn quality_extractor() -> ExtractFn {
        Box::new(|path, _image, _kind| {
            let q = f64::from(quality_index(path)?);
            Ok(vec![q, q / 2.0])
        })
    }

    fn pipeline(config: PipelineConfig) -> Pipeline {
        Pipeline::new(config, stub_loader()).with_extractor(quality_extractor())
    }

    fn base_config() -> PipelineConfig {
        PipelineConfig::builder()
            .criteria(SelectionCriteria {
                step: 10,
                index_range: (0, 900),
                data_window: (0, 200),
                slice_before_tracking: false,
            })
            .parallel(false)
            .build()
    }

    #[test]
    fn test_step_selection_and_crossing() {
        // Mean of Appart1opt02 thresholds is 30.
        let dir = scene_dir("Appart1opt02", &[10, 20, 25, 30, 40]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let labels: Vec<&str> = curves.samples.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["00010", "00020", "00030", "00040"]);
        assert_eq!(curves.crossing().unwrap().quality, 30);
        assert_eq!(curves.samples.iter().filter(|s| s.is_threshold).count(), 1);
        assert!((curves.threshold_mean - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tie_takes_first_in_file_order() {
        // Both files parse to quality 30, the Appart1opt02 mean; only the
        // first in file order carries the flag.
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join("Appart1opt02");
        fs::create_dir(&scene).unwrap();
        fs::write(scene.join("Appart1opt02_00030.png"), b"stub").unwrap();
        fs::write(scene.join("Appart1opt02_030.png"), b"stub").unwrap();

        let curves = pipeline(base_config()).run_scene(&scene, &table()).unwrap();

        assert_eq!(curves.samples.len(), 2);
        assert_eq!(curves.crossing().unwrap().label, "00030");
        assert_eq!(curves.samples.iter().filter(|s| s.is_threshold).count(), 1);
    }

    #[test]
    fn test_off_step_crossing_is_appended() {
        // Mean of Cuisine01 thresholds is 12; quality 15 crosses first but
        // sits off the step grid.
        let dir = scene_dir("Cuisine01", &[10, 15, 20]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Cuisine01"), &table())
            .unwrap();

        let qualities: Vec<u32> = curves.samples.iter().map(|s| s.quality).collect();
        assert_eq!(qualities, [10, 15, 20]);
        assert!(curves.samples[1].is_threshold);
        assert!(!curves.samples[0].is_threshold);
        assert!(!curves.samples[2].is_threshold);
    }

    #[test]
    fn test_no_crossing_is_not_an_error() {
        let dir = scene_dir("Appart1opt02", &[10, 20]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        assert!(curves.crossing().is_none());
        assert_eq!(curves.samples.len(), 2);
    }

    #[test]
    fn test_unknown_scene_is_fatal() {
        let dir = scene_dir("Unlisted", &[10]);
        let err = pipeline(base_config())
            .run_scene(&dir.path().join("Unlisted"), &table())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownScene(name) if name == "Unlisted"));
    }

    #[test]
    fn test_empty_scene_yields_empty_curves() {
        let dir = scene_dir("Appart1opt02", &[]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        assert!(curves.samples.is_empty());
        assert!(curves.value_range.is_degenerate());
    }

    #[test]
    fn test_range_mode_uses_scene_extremes() {
        let mut config = base_config();
        config.mode = NormalizationMode::GlobalRange;

        // Vectors are [10, 5] and [20, 10], so the scene range is [5, 20].
        let dir = scene_dir("Appart1opt02", &[10, 20]);
        let curves = pipeline(config)
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        assert_eq!(curves.value_range, ValueRange { min: 5.0, max: 20.0 });
        let first = &curves.samples[0].values;
        assert!((first[0] - 5.0 / 15.0).abs() < 1e-12);
        assert!((first[1] - 0.0).abs() < 1e-12);
        assert!((curves.samples[1].values[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_mode_scales_each_vector() {
        let mut config = base_config();
        config.mode = NormalizationMode::SelfScaled;

        let dir = scene_dir("Appart1opt02", &[10, 20]);
        let curves = pipeline(config)
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        for sample in &curves.samples {
            assert_eq!(sample.values, vec![1.0, 0.0]);
        }
    }

    #[test]
    fn test_early_slice_narrows_tracked_range() {
        let dir = scene_dir("Appart1opt02", &[10, 20]);

        let mut late = base_config();
        late.mode = NormalizationMode::GlobalRange;
        late.criteria.data_window = (0, 1);
        let late_curves = pipeline(late)
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let mut early = base_config();
        early.mode = NormalizationMode::GlobalRange;
        early.criteria.data_window = (0, 1);
        early.criteria.slice_before_tracking = true;
        let early_curves = pipeline(early)
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        // Late slicing tracks the full vectors, range [5, 20]; early slicing
        // tracks only the first component, range [10, 20].
        assert_eq!(
            late_curves.value_range,
            ValueRange { min: 5.0, max: 20.0 }
        );
        assert_eq!(
            early_curves.value_range,
            ValueRange {
                min: 10.0,
                max: 20.0
            }
        );
        assert!((early_curves.samples[0].values[0] - 0.0).abs() < 1e-12);
        assert!((early_curves.samples[1].values[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let pipe = {
            let mut config = base_config();
            config.mode = NormalizationMode::GlobalRange;
            pipeline(config)
        };

        let big = scene_dir("Appart1opt02", &[100, 200]);
        let small = scene_dir("Cuisine01", &[10, 20]);

        let big_curves = pipe
            .run_scene(&big.path().join("Appart1opt02"), &table())
            .unwrap();
        let small_curves = pipe
            .run_scene(&small.path().join("Cuisine01"), &table())
            .unwrap();

        assert_eq!(big_curves.value_range.max, 200.0);
        assert_eq!(small_curves.value_range.max, 20.0);
    }

    #[test]
    fn test_progress_is_monotonic_and_complete() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let dir = scene_dir("Appart1opt02", &[10, 20, 30]);
        pipeline(base_config())
            .on_progress(Box::new(move |done, total| {
                sink.lock().unwrap().push((done, total));
            }))
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let dir = scene_dir("Cuisine01", &[10, 15, 20, 30]);
        let pipe = {
            let mut config = base_config();
            config.mode = NormalizationMode::GlobalRange;
            pipeline(config)
        };

        let first = pipe
            .run_scene(&dir.path().join("Cuisine01"), &table())
            .unwrap();
        let second = pipe
            .run_scene(&dir.path().join("Cuisine01"), &table())
            .unwrap();

        assert_eq!(first.samples.len(), second.samples.len());
        for (a, b) in first.samples.iter().zip(&second.samples) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.values, b.values);
            assert_eq!(a.is_threshold, b.is_threshold);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = scene_dir("Appart1opt02", &[10, 20, 30, 40, 50]);

        let sequential = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let mut config = base_config();
        config.parallel = true;
        let parallel = pipeline(config)
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let seq: Vec<_> = sequential.samples.iter().map(|s| &s.label).collect();
        let par: Vec<_> = parallel.samples.iter().map(|s| &s.label).collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_invalid_config_rejected_before_scan() {
        let mut config = base_config();
        config.criteria.step = 0;

        let err = pipeline(config)
            .run_scene(Path::new("/definitely/not/there"), &table())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_plot_file_name_is_deterministic() {
        let dir = scene_dir("Appart1opt02", &[10, 20, 30]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        assert_eq!(curves.plot_file_name(), "Appart1opt02_svd_10_raw_0.svg");
    }

    #[test]
    fn test_write_json_round_trips() {
        let dir = scene_dir("Appart1opt02", &[10, 20, 30]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let out = TempDir::new().unwrap();
        let path = curves.write_json(out.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Appart1opt02_svd_10_raw_0.json"
        );

        let loaded: SceneCurves =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.scene, curves.scene);
        assert_eq!(loaded.samples.len(), curves.samples.len());
    }

    #[test]
    fn test_write_csv_long_form() {
        let dir = scene_dir("Appart1opt02", &[10]);
        let curves = pipeline(base_config())
            .run_scene(&dir.path().join("Appart1opt02"), &table())
            .unwrap();

        let out = TempDir::new().unwrap();
        let path = curves.write_csv(out.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "scene,label,quality,component,value,is_threshold"
        );
        // One vector of two components selected, so two data rows.
        assert_eq!(lines.count(), 2);
    }
}
