//! Thresholds command: inspect a scene threshold table.

use std::path::Path;

use anyhow::{Context, Result};
use scene_curves::ThresholdTable;
use scene_curves::thresholds::zone_name;

pub fn run(path: &Path, scene: Option<&str>, include_excluded: bool, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Loading thresholds from: {}", path.display());
    }

    let table = if include_excluded {
        ThresholdTable::load_with_exclusions(path, &[])
    } else {
        ThresholdTable::load(path)
    }
    .with_context(|| format!("failed to load {}", path.display()))?;

    if let Some(name) = scene {
        let zones = table
            .get(name)
            .with_context(|| format!("no threshold record for scene {name}"))?;

        println!("Scene: {name}");
        println!();
        println!("{:<10} {:>10}", "Zone", "Threshold");
        println!("{:-<21}", "");
        for (i, value) in zones.iter().enumerate() {
            println!("{:<10} {:>10}", zone_name(i), value);
        }
        println!("{:-<21}", "");
        println!("{:<10} {:>10.2}", "mean", table.mean_for(name)?);
        return Ok(());
    }

    println!("Scenes: {}", table.len());
    println!();
    println!("{:<30} {:>6} {:>12}", "Scene", "Zones", "Mean");
    println!("{:-<50}", "");
    for name in table.scene_names() {
        let zones = table.zone_count(name).unwrap_or(0);
        println!("{:<30} {:>6} {:>12.2}", name, zones, table.mean_for(name)?);
    }

    Ok(())
}
