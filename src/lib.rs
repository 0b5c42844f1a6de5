//! # scene-curves
//!
//! SVD feature curve selection and normalization for progressively rendered
//! scenes.
//!
//! Rendering a scene progressively produces a sequence of images named by
//! sample count. This library reduces each image to a feature vector,
//! selects the subset worth keeping (a periodic step plus the image that
//! first reaches the scene's noise threshold), normalizes the selected
//! vectors, and renders or serializes the result. Image loading and feature
//! extraction are callback seams, so embedders can plug in their own.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scene_curves::{Pipeline, PipelineConfig, PlotOptions, ThresholdTable};
//!
//! let thresholds = ThresholdTable::load("thresholds.csv")?;
//!
//! let config = PipelineConfig::builder()
//!     .feature("svd".parse()?)
//!     .mode("range".parse()?)
//!     .build();
//!
//! let pipeline = Pipeline::with_default_loader(config);
//! let curves = pipeline.run_scene("scenes/Cuisine01".as_ref(), &thresholds)?;
//! scene_curves::chart::write_svg(&curves, &PlotOptions::default(), "plots".as_ref())?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`quality`]: Quality-index parsing from file names
//! - [`thresholds`]: Scene threshold tables and their means
//! - [`scene`]: Scene directory scanning
//! - [`raster`]: Pixel buffer types
//! - [`features`]: Feature extraction (SVD of pixel-derived matrices)
//! - [`select`]: Image selection and value-range tracking
//! - [`normalize`]: Vector windowing and normalization
//! - [`pipeline`]: End-to-end curve pipeline and report output
//! - [`chart`]: SVG chart rendering
//! - [`loader`]: Disk image loading (behind the `image-load` feature)

pub mod chart;
pub mod error;
pub mod features;
#[cfg(feature = "image-load")]
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod quality;
pub mod raster;
pub mod scene;
pub mod select;
pub mod thresholds;

// Re-export commonly used types
pub use chart::PlotOptions;
pub use error::{Error, Result};
pub use features::{ExtractFn, FeatureKind, FeatureVector};
pub use normalize::NormalizationMode;
pub use pipeline::{CurveSample, LoadImageFn, Pipeline, PipelineConfig, ProgressFn, SceneCurves};
pub use raster::ImageData;
pub use scene::{Scene, SceneImage};
pub use select::{SelectionCriteria, ThresholdTracker, ValueRange};
pub use thresholds::{DEFAULT_EXCLUDED_SCENES, ThresholdTable};
