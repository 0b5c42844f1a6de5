//! Quality-index derivation from scene image file names.
//!
//! Progressively rendered scene images carry their render progress (sample
//! count or elapsed minutes) as the final `_`-separated token of the file
//! stem, zero-padded for lexicographic ordering: `SdbCenter_00920.png` has
//! quality index 920 and postfix label `"00920"`.

use std::path::Path;

use crate::error::{Error, Result};

/// Extract the quality-index token from a file name, padding preserved.
///
/// The postfix is used verbatim as a display label for plotted curves. It is
/// stable per file; two images of the same scene only collide if their names
/// share the full token, in which case downstream display is cosmetically
/// degraded but nothing fails.
///
/// # Errors
///
/// Returns [`Error::MalformedFilename`] if the stem has no trailing numeric
/// token.
pub fn postfix_label(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::MalformedFilename(path.to_path_buf()))?;

    let token = stem.rsplit('_').next().unwrap_or("");
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedFilename(path.to_path_buf()));
    }

    Ok(token.to_string())
}

/// Parse the render-progress ordinal encoded in an image file name.
///
/// # Errors
///
/// Returns [`Error::MalformedFilename`] if the name carries no numeric token
/// or the token does not fit a `u32`.
pub fn quality_index(path: &Path) -> Result<u32> {
    let token = postfix_label(path)?;
    token
        .parse::<u32>()
        .map_err(|_| Error::MalformedFilename(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_quality_index_basic() {
        let path = PathBuf::from("/data/SdbCenter/SdbCenter_00920.png");
        assert_eq!(quality_index(&path).unwrap(), 920);
    }

    #[test]
    fn test_postfix_keeps_zero_padding() {
        let path = PathBuf::from("SdbCenter_00050.png");
        assert_eq!(postfix_label(&path).unwrap(), "00050");
        assert_eq!(quality_index(&path).unwrap(), 50);
    }

    #[test]
    fn test_multiple_underscores() {
        let path = PathBuf::from("appart1opt02_part_00870.png");
        assert_eq!(postfix_label(&path).unwrap(), "00870");
        assert_eq!(quality_index(&path).unwrap(), 870);
    }

    #[test]
    fn test_no_underscore_numeric_stem() {
        let path = PathBuf::from("00100.png");
        assert_eq!(quality_index(&path).unwrap(), 100);
    }

    #[test]
    fn test_missing_token_fails() {
        let path = PathBuf::from("cover.png");
        assert!(matches!(
            quality_index(&path),
            Err(Error::MalformedFilename(_))
        ));
    }

    #[test]
    fn test_non_numeric_token_fails() {
        let path = PathBuf::from("scene_final.png");
        assert!(matches!(
            postfix_label(&path),
            Err(Error::MalformedFilename(_))
        ));
    }

    #[test]
    fn test_empty_token_fails() {
        let path = PathBuf::from("scene_.png");
        assert!(matches!(
            postfix_label(&path),
            Err(Error::MalformedFilename(_))
        ));
    }
}
