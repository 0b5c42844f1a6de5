//! Scene directories and their progressively rendered images.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::quality::{postfix_label, quality_index};

/// One rendered image inside a scene directory.
#[derive(Debug, Clone, Serialize)]
pub struct SceneImage {
    /// Path to the file as scanned.
    pub path: PathBuf,
    /// Sample-count token from the file name, zero padding preserved.
    pub postfix: String,
    /// Numeric quality index parsed from the postfix.
    pub quality: u32,
}

/// A scene directory with its images in render order.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    /// Directory name, used to look up the threshold record.
    pub name: String,
    /// Directory the images were scanned from.
    pub path: PathBuf,
    /// Images sorted by file name. Zero-padded postfixes make this
    /// ascending sample count.
    pub images: Vec<SceneImage>,
}

impl Scene {
    /// Scan a scene directory for rendered images.
    ///
    /// Keeps direct children whose file name contains `marker`;
    /// subdirectories are not descended into. A matching file whose name
    /// carries no sample-count postfix is an error, since it would
    /// otherwise silently shift the curve.
    pub fn scan(path: &Path, marker: &str) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Scene(format!(
                "scene path does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(Error::Scene(format!(
                "scene path is not a directory: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::Scene(format!(
                    "cannot derive scene name from path: {}",
                    path.display()
                ))
            })?
            .to_string();

        let entries = fs::read_dir(path).map_err(|e| {
            Error::Scene(format!("failed to read directory {}: {e}", path.display()))
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::Scene(format!("failed to read entry in {}: {e}", path.display()))
            })?;

            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }

            let matches = entry_path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.contains(marker));
            if matches {
                files.push(entry_path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut images = Vec::with_capacity(files.len());
        for file in files {
            let postfix = postfix_label(&file)?;
            let quality = quality_index(&file)?;
            images.push(SceneImage {
                path: file,
                postfix,
                quality,
            });
        }

        Ok(Self { name, path: path.to_path_buf(), images })
    }

    /// Smallest and largest quality index present, if any image matched.
    #[must_use]
    pub fn quality_bounds(&self) -> Option<(u32, u32)> {
        let first = self.images.first()?.quality;
        let (mut lo, mut hi) = (first, first);
        for img in &self.images {
            lo = lo.min(img.quality);
            hi = hi.max(img.quality);
        }
        Some((lo, hi))
    }
}
