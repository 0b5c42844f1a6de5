//! Pixel buffers accepted by the feature extractor.
//!
//! Loading and decoding are collaborator concerns (see [`crate::loader`] for
//! the default); the pipeline itself only ever sees [`ImageData`].

use imgref::ImgVec;
use rgb::RGB8;

/// Decoded image data handed to feature extraction.
///
/// Supports both `imgref::ImgVec` and raw slices for flexibility.
#[derive(Clone)]
pub enum ImageData {
    /// RGB8 image using imgref.
    Rgb8(ImgVec<RGB8>),

    /// RGB8 raw slice with dimensions, row-major.
    RgbSlice {
        /// Pixel data in row-major order, three bytes per pixel.
        data: Vec<u8>,
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
    },
}

impl ImageData {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Rgb8(img) => img.width(),
            Self::RgbSlice { width, .. } => *width,
        }
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Rgb8(img) => img.height(),
            Self::RgbSlice { height, .. } => *height,
        }
    }

    /// Convert to a flat RGB8 byte vector, row-major.
    #[must_use]
    pub fn to_rgb8_vec(&self) -> Vec<u8> {
        match self {
            Self::Rgb8(img) => img.pixels().flat_map(|p| [p.r, p.g, p.b]).collect(),
            Self::RgbSlice { data, .. } => data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_dimensions() {
        let img = ImageData::RgbSlice {
            data: vec![0u8; 8 * 4 * 3],
            width: 8,
            height: 4,
        };
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 4);
    }

    #[test]
    fn test_imgref_round_trip() {
        let pixels = vec![RGB8 { r: 10, g: 20, b: 30 }; 4];
        let img = ImageData::Rgb8(ImgVec::new(pixels, 2, 2));
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        let flat = img.to_rgb8_vec();
        assert_eq!(flat.len(), 12);
        assert_eq!(&flat[0..3], &[10, 20, 30]);
    }
}
