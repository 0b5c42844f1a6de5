//! Default image loading from disk.
//!
//! Decodes rendered images into [`ImageData`] using the `image` crate. The
//! whole module sits behind the `image-load` feature so embedders with their
//! own decode path can drop the dependency.

use std::path::Path;

use crate::error::{Error, Result};
use crate::pipeline::LoadImageFn;
use crate::raster::ImageData;

/// Decode one image file to RGB8 pixels.
///
/// Non-RGB sources (grayscale, RGBA) are converted on the way in.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] when the file is missing or not a decodable
/// image.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let decoded = image::open(path).map_err(|e| Error::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgb = decoded.into_rgb8();
    let (width, height) = rgb.dimensions();

    Ok(ImageData::RgbSlice {
        data: rgb.into_raw(),
        width: width as usize,
        height: height as usize,
    })
}

/// Boxed [`load_image`] for use as a pipeline callback.
#[must_use]
pub fn default_loader() -> LoadImageFn {
    Box::new(load_image)
}
