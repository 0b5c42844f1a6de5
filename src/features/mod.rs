//! Feature vectors computed per scene image.
//!
//! A feature is an opaque function from a decoded image to an ordered numeric
//! descriptor, typically the singular values of a pixel-derived matrix. The
//! recognized algorithms are enumerated by [`FeatureKind`]; the extraction
//! seam is the [`ExtractFn`] callback so callers can substitute their own
//! implementation, with [`extract`] as the default.

mod svd;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::ImageData;
use svd::{Matrix, luma, singular_values};

/// Ordered numeric descriptor of one image, immutable once produced.
pub type FeatureVector = Vec<f64>;

/// Extraction callback type.
///
/// Takes the image path (error context only), decoded pixels, and the feature
/// to compute; returns the feature vector.
pub type ExtractFn =
    Box<dyn Fn(&Path, &ImageData, FeatureKind) -> Result<FeatureVector> + Send + Sync>;

/// Recognized feature algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Singular values of the luminance matrix, descending.
    Svd,
    /// `ln(1 + sigma)` over the luminance singular values.
    SvdLog,
    /// Per-channel singular values averaged across R, G, and B.
    SvdChannelMean,
}

impl FeatureKind {
    /// Every recognized feature, for help texts and validation messages.
    pub const ALL: [Self; 3] = [Self::Svd, Self::SvdLog, Self::SvdChannelMean];

    /// Canonical name used on the command line and in output file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Svd => "svd",
            Self::SvdLog => "svd_log",
            Self::SvdChannelMean => "svd_channel_mean",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "svd" => Ok(Self::Svd),
            "svd_log" => Ok(Self::SvdLog),
            "svd_channel_mean" => Ok(Self::SvdChannelMean),
            other => Err(Error::UnsupportedFeature(other.to_string())),
        }
    }
}

/// Default feature extraction.
///
/// # Errors
///
/// Returns [`Error::FeatureComputation`] when the pixel buffer is corrupt
/// (zero dimensions or a length that does not match them).
pub fn extract(path: &Path, image: &ImageData, kind: FeatureKind) -> Result<FeatureVector> {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Err(Error::FeatureComputation {
            path: path.to_path_buf(),
            reason: format!("image has zero dimension ({width}x{height})"),
        });
    }

    let rgb = image.to_rgb8_vec();
    if rgb.len() != width * height * 3 {
        return Err(Error::FeatureComputation {
            path: path.to_path_buf(),
            reason: format!(
                "pixel buffer length {} does not match {width}x{height} RGB8",
                rgb.len()
            ),
        });
    }

    match kind {
        FeatureKind::Svd => Ok(luma_spectrum(&rgb, width, height)),
        FeatureKind::SvdLog => Ok(luma_spectrum(&rgb, width, height)
            .into_iter()
            .map(f64::ln_1p)
            .collect()),
        FeatureKind::SvdChannelMean => {
            let spectra: Vec<Vec<f64>> = (0..3)
                .map(|ch| {
                    let data: Vec<f64> = rgb
                        .chunks_exact(3)
                        .map(|px| f64::from(px[ch]) / 255.0)
                        .collect();
                    singular_values(Matrix::new(height, width, data))
                })
                .collect();
            let len = spectra[0].len();
            Ok((0..len)
                .map(|i| (spectra[0][i] + spectra[1][i] + spectra[2][i]) / 3.0)
                .collect())
        }
    }
}

/// Boxed [`extract`] for use as a pipeline callback.
#[must_use]
pub fn default_extractor() -> ExtractFn {
    Box::new(|path, image, kind| extract(path, image, kind))
}

fn luma_spectrum(rgb: &[u8], width: usize, height: usize) -> Vec<f64> {
    let data: Vec<f64> = rgb
        .chunks_exact(3)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect();
    singular_values(Matrix::new(height, width, data))
}
