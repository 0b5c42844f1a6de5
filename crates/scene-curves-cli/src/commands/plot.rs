//! Plot command: run the pipeline over one scene and write its artifacts.

use std::str::FromStr;

use anyhow::{Context, Result};
use scene_curves::{
    FeatureKind, NormalizationMode, Pipeline, PipelineConfig, PlotOptions, SelectionCriteria,
    ThresholdTable, chart,
};

use crate::PlotArgs;

pub fn run(args: PlotArgs, verbose: bool) -> Result<()> {
    let feature: FeatureKind = args.feature.parse().with_context(|| {
        format!(
            "unusable --feature value: {} (expected one of: {})",
            args.feature,
            FeatureKind::ALL.map(FeatureKind::name).join(", ")
        )
    })?;
    let mode: NormalizationMode = args.mode.parse().with_context(|| {
        format!(
            "unusable --mode value: {} (expected one of: {})",
            args.mode,
            NormalizationMode::ALL.map(NormalizationMode::name).join(", ")
        )
    })?;
    let data_window =
        parse_pair::<usize>(&args.interval).context("--interval expects begin,end")?;
    let index_range = parse_pair::<u32>(&args.indices).context("--indices expects begin,end")?;
    let y_bounds = args
        .ylim
        .as_deref()
        .map(parse_pair::<f64>)
        .transpose()
        .context("--ylim expects low,high")?;

    let config = PipelineConfig::builder()
        .feature(feature)
        .mode(mode)
        .criteria(SelectionCriteria {
            data_window,
            index_range,
            step: args.step,
            slice_before_tracking: args.early_slice,
        })
        .extension_marker(args.marker)
        .parallel(!args.sequential)
        .build();
    // Reject bad parameters before any image is touched.
    config.validate().context("invalid selection parameters")?;
    log::debug!(
        "feature {feature}, mode {mode}, step {}, window {data_window:?}, indices {index_range:?}",
        args.step
    );

    let mut options = PlotOptions::new();
    if let Some((low, high)) = y_bounds {
        options = options.with_y_bounds(low, high);
    }
    if let Some(label) = args.label {
        options = options.with_title(label);
    }
    options.validate().context("invalid chart options")?;

    if verbose {
        eprintln!("Loading thresholds from: {}", args.thresholds.display());
    }
    let thresholds = ThresholdTable::load(&args.thresholds)
        .with_context(|| format!("failed to load thresholds from {}", args.thresholds.display()))?;

    let pipeline = Pipeline::with_default_loader(config).on_progress(Box::new(progress_line));

    let curves = pipeline
        .run_scene(&args.scene, &thresholds)
        .with_context(|| format!("curve extraction failed for {}", args.scene.display()))?;

    println!("Scene: {}", curves.scene);
    println!("Selected samples: {}", curves.samples.len());
    match curves.crossing() {
        Some(sample) => println!(
            "Threshold mean {:.2} first reached at sample {}",
            curves.threshold_mean, sample.label
        ),
        None => println!("Threshold mean {:.2} never reached", curves.threshold_mean),
    }

    if curves.samples.is_empty() {
        println!("Nothing selected; skipping chart");
    } else {
        let path =
            chart::write_svg(&curves, &options, &args.output).context("failed to write chart")?;
        println!("Chart: {}", path.display());
    }

    if args.json {
        let path = curves
            .write_json(&args.output)
            .context("failed to write JSON report")?;
        println!("JSON: {}", path.display());
    }
    if args.csv {
        let path = curves
            .write_csv(&args.output)
            .context("failed to write CSV report")?;
        println!("CSV: {}", path.display());
    }

    Ok(())
}

/// Carriage-return progress line on stderr, finished with a newline.
fn progress_line(done: usize, total: usize) {
    let percent = done as f64 / total as f64 * 100.0;
    eprint!("\r{done}/{total} images ({percent:.2}%)");
    if done == total {
        eprintln!();
    }
}

fn parse_pair<T: FromStr>(s: &str) -> Result<(T, T)> {
    let (first, second) = s
        .split_once(',')
        .with_context(|| format!("expected two comma-separated values, got {s:?}"))?;
    let first: T = first
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("not a number: {first:?}"))?;
    let second: T = second
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("not a number: {second:?}"))?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair::<u32>("0,900").unwrap(), (0, 900));
        assert_eq!(parse_pair::<usize>(" 40 , 60 ").unwrap(), (40, 60));
        assert_eq!(parse_pair::<f64>("0,1").unwrap(), (0.0, 1.0));

        assert!(parse_pair::<u32>("900").is_err());
        assert!(parse_pair::<u32>("a,b").is_err());
    }
}
