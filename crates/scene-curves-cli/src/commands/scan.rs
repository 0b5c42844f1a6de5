//! Scan command: list the rendered images of a scene directory.

use std::path::Path;

use anyhow::{Context, Result};
use scene_curves::Scene;

pub fn run(scene_dir: &Path, marker: &str, json: bool, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Scanning: {}", scene_dir.display());
    }

    let scene = Scene::scan(scene_dir, marker)
        .with_context(|| format!("failed to scan {}", scene_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!("Scene: {}", scene.name);
    println!("Images: {}", scene.images.len());
    if let Some((lo, hi)) = scene.quality_bounds() {
        println!("Quality range: {lo} - {hi}");
    }
    println!();

    println!("{:<44} {:>8}", "File", "Quality");
    println!("{:-<53}", "");
    for image in scene.images.iter().take(20) {
        let name = image
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("?");
        println!("{:<44} {:>8}", name, image.quality);
    }
    if scene.images.len() > 20 {
        println!("... and {} more images", scene.images.len() - 20);
    }

    Ok(())
}
