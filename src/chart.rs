//! SVG chart generation for feature curves.
//!
//! Renders every selected sample of a scene as one line over component
//! indices, with the threshold-crossing sample drawn wide and red so it
//! stands out. All charts support light and dark mode via CSS media queries.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::normalize::NormalizationMode;
use crate::pipeline::SceneCurves;

/// Rendering options for a curve chart.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Fixed Y-axis bounds; computed from the data when absent.
    pub y_bounds: Option<(f64, f64)>,
    /// Chart title; defaults to scene, feature, and mode.
    pub title: Option<String>,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            y_bounds: None,
            title: None,
            width: 700,
            height: 450,
        }
    }
}

impl PlotOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the Y axis to `(low, high)`.
    #[must_use]
    pub fn with_y_bounds(mut self, low: f64, high: f64) -> Self {
        self.y_bounds = Some((low, high));
        self
    }

    /// Override the chart title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the chart dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject bounds that would flip or collapse the Y axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the lower bound is not below the upper.
    pub fn validate(&self) -> Result<()> {
        if let Some((low, high)) = self.y_bounds {
            if low >= high {
                return Err(Error::Config(format!(
                    "y bounds lower {low} must be below upper {high}"
                )));
            }
        }
        Ok(())
    }
}

/// Renders the curves of one scene as an SVG chart.
///
/// Returns an empty string when there is nothing to plot.
#[must_use]
pub fn render_svg(curves: &SceneCurves, options: &PlotOptions) -> String {
    let mut svg = String::with_capacity(8192);

    let samples: Vec<_> = curves.samples.iter().filter(|s| !s.values.is_empty()).collect();
    if samples.is_empty() {
        return String::new();
    }

    let max_len = samples.iter().map(|s| s.values.len()).max().unwrap_or(1);
    let (min_x, max_x) = if max_len > 1 {
        (0.0, (max_len - 1) as f64)
    } else {
        (-0.5, 0.5)
    };
    let (min_y, max_y) = match options.y_bounds {
        Some((low, high)) => (low, high),
        None => {
            let all_y: Vec<f64> = samples.iter().flat_map(|s| s.values.iter().copied()).collect();
            let min = all_y.iter().copied().fold(f64::INFINITY, f64::min);
            let max = all_y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            pad_bounds(min, max, 0.05)
        }
    };

    let width = options.width;
    let height = options.height;
    let margin_top = 50;
    let margin_right = 160;
    let margin_bottom = 70;
    let margin_left = 90;
    let plot_width = width - margin_left - margin_right;
    let plot_height = height - margin_top - margin_bottom;

    let scale_x = |v: f64| -> f64 {
        f64::from(margin_left) + (v - min_x) / (max_x - min_x) * f64::from(plot_width)
    };
    let scale_y = |v: f64| -> f64 {
        f64::from(margin_top) + (1.0 - (v - min_y) / (max_y - min_y)) * f64::from(plot_height)
    };

    // SVG header
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        width, height
    );

    // CSS with dark mode support
    svg.push_str(
        r#"<style>
  :root {
    --bg-color: #ffffff;
    --text-color: #1a1a1a;
    --grid-color: #e0e0e0;
    --axis-color: #333333;
    --legend-bg: #ffffff;
    --legend-border: #cccccc;
  }
  @media (prefers-color-scheme: dark) {
    :root {
      --bg-color: #1a1a1a;
      --text-color: #e0e0e0;
      --grid-color: #404040;
      --axis-color: #b0b0b0;
      --legend-bg: #2a2a2a;
      --legend-border: #505050;
    }
  }
  .background { fill: var(--bg-color); }
  .title { font: bold 18px system-ui, sans-serif; fill: var(--text-color); }
  .axis-label { font: 13px system-ui, sans-serif; fill: var(--text-color); }
  .tick-label { font: 11px system-ui, sans-serif; fill: var(--text-color); }
  .legend { font: 12px system-ui, sans-serif; fill: var(--text-color); }
  .grid { stroke: var(--grid-color); stroke-width: 1; }
  .axis { stroke: var(--axis-color); stroke-width: 1.5; }
  .legend-bg { fill: var(--legend-bg); stroke: var(--legend-border); }
</style>
"#,
    );

    // Background
    let _ = writeln!(
        svg,
        r#"<rect class="background" width="{}" height="{}"/>"#,
        width, height
    );

    // Title
    let title = options.title.clone().unwrap_or_else(|| {
        format!("{} ({}, {})", curves.scene, curves.feature, curves.mode)
    });
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" class="title">{}</text>"#,
        f64::from(width) / 2.0,
        title
    );

    // Grid lines
    for i in 0..=5 {
        let frac = f64::from(i) / 5.0;
        let x = scale_x(min_x + frac * (max_x - min_x));
        let y = scale_y(min_y + frac * (max_y - min_y));

        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" class="grid"/>"#,
            x,
            margin_top,
            x,
            height - margin_bottom
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" class="grid"/>"#,
            margin_left,
            y,
            width - margin_right,
            y
        );
    }

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        margin_left,
        height - margin_bottom,
        width - margin_right,
        height - margin_bottom
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        margin_left,
        margin_top,
        margin_left,
        height - margin_bottom
    );

    // Tick labels
    for i in 0..=5 {
        let frac = f64::from(i) / 5.0;
        let x_val = min_x + frac * (max_x - min_x);
        let y_val = min_y + frac * (max_y - min_y);

        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{}" text-anchor="middle" class="tick-label">{:.0}</text>"#,
            scale_x(x_val),
            height - margin_bottom + 20,
            x_val
        );
        let y_label = if y_val.abs() < 0.0001 && y_val != 0.0 {
            format!("{y_val:.6}")
        } else {
            format!("{y_val:.2}")
        };
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.2}" text-anchor="end" class="tick-label">{}</text>"#,
            margin_left - 10,
            scale_y(y_val) + 4.0,
            y_label
        );
    }

    // Axis labels
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" class="axis-label">Component index →</text>"#,
        f64::from(width) / 2.0,
        height - 20
    );
    let y_axis = match curves.mode {
        NormalizationMode::Raw => "Feature value",
        NormalizationMode::SelfScaled | NormalizationMode::GlobalRange => "Normalized value",
    };
    let _ = writeln!(
        svg,
        r#"<text x="25" y="{}" text-anchor="middle" class="axis-label" transform="rotate(-90 25 {})">{}</text>"#,
        f64::from(height) / 2.0,
        f64::from(height) / 2.0,
        y_axis
    );

    // One line per sample; the crossing sample is drawn last so its wide
    // red stroke sits on top.
    let mut ordered: Vec<_> = samples.iter().copied().filter(|s| !s.is_threshold).collect();
    ordered.extend(samples.iter().copied().filter(|s| s.is_threshold));

    let mut palette_index = 0;
    for sample in &ordered {
        let (color, stroke) = if sample.is_threshold {
            (colors::RED, 6.0)
        } else {
            let color = colors::SERIES[palette_index % colors::SERIES.len()];
            palette_index += 1;
            (color, 1.8)
        };

        let mut path = String::new();
        for (i, value) in sample.values.iter().enumerate() {
            let prefix = if i == 0 { "M" } else { " L" };
            let _ = write!(
                path,
                "{} {:.2},{:.2}",
                prefix,
                scale_x(i as f64),
                scale_y(*value)
            );
        }
        let _ = writeln!(
            svg,
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="none"/>"#,
            path, color, stroke
        );
    }

    // Legend
    let legend_x = width - margin_right + 15;
    let legend_y = margin_top + 20;
    let legend_height = 20 + ordered.len() as u32 * 20;

    let _ = writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="135" height="{}" rx="4" class="legend-bg"/>"#,
        legend_x,
        legend_y - 15,
        legend_height
    );

    palette_index = 0;
    for (i, sample) in ordered.iter().enumerate() {
        let (color, name) = if sample.is_threshold {
            (colors::RED, format!("{} threshold", sample.label))
        } else {
            let color = colors::SERIES[palette_index % colors::SERIES.len()];
            palette_index += 1;
            (color, format!("{} samples", sample.label))
        };

        let y_offset = legend_y + i as u32 * 20;
        let _ = writeln!(
            svg,
            r#"<circle cx="{}" cy="{}" r="5" fill="{}"/>"#,
            legend_x + 15,
            y_offset + 5,
            color
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" class="legend">{}</text>"#,
            legend_x + 28,
            y_offset + 9,
            name
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render and write the chart into `dir` under the run's canonical name.
///
/// # Errors
///
/// Fails on invalid options, when the scene has no samples to plot, or when
/// the file cannot be written.
pub fn write_svg(curves: &SceneCurves, options: &PlotOptions, dir: &Path) -> Result<PathBuf> {
    options.validate()?;
    let svg = render_svg(curves, options);
    if svg.is_empty() {
        return Err(Error::Render(format!(
            "no samples to plot for scene {}",
            curves.scene
        )));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(curves.plot_file_name());
    std::fs::write(&path, svg)?;
    Ok(path)
}

/// Pads bounds outward; collapses to a unit band around a flat value.
fn pad_bounds(min: f64, max: f64, padding: f64) -> (f64, f64) {
    if max > min {
        let range = max - min;
        (min - range * padding, max + range * padding)
    } else {
        (min - 0.5, max + 0.5)
    }
}

/// Standard color palette for curve charts.
pub mod colors {
    /// Red, reserved for the threshold-crossing sample.
    pub const RED: &str = "#e74c3c";
    /// Blue.
    pub const BLUE: &str = "#3498db";
    /// Green.
    pub const GREEN: &str = "#27ae60";
    /// Orange.
    pub const ORANGE: &str = "#e67e22";
    /// Purple.
    pub const PURPLE: &str = "#9b59b6";

    /// Cycle order for ordinary sample lines.
    pub const SERIES: [&str; 4] = [BLUE, GREEN, ORANGE, PURPLE];
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::features::FeatureKind;
    use crate::pipeline::CurveSample;
    use crate::select::{SelectionCriteria, ValueRange};

    fn sample_curves() -> SceneCurves {
        let mut range = ValueRange::new();
        range.observe(&[0.0, 1.0]);
        SceneCurves {
            scene: "Cuisine01".to_string(),
            feature: FeatureKind::Svd,
            mode: NormalizationMode::GlobalRange,
            criteria: SelectionCriteria::default(),
            threshold_mean: 40.0,
            value_range: range,
            samples: vec![
                CurveSample {
                    label: "00020".to_string(),
                    quality: 20,
                    values: vec![1.0, 0.6, 0.2],
                    is_threshold: false,
                },
                CurveSample {
                    label: "00040".to_string(),
                    quality: 40,
                    values: vec![0.9, 0.5, 0.1],
                    is_threshold: true,
                },
            ],
            generated: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_render_basic() {
        let svg = render_svg(&sample_curves(), &PlotOptions::default());

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("Cuisine01 (svd, range)"));
        assert!(svg.contains("00020 samples"));
        assert!(svg.contains("00040 threshold"));
    }

    #[test]
    fn test_threshold_sample_is_red_and_wide() {
        let svg = render_svg(&sample_curves(), &PlotOptions::default());
        assert!(svg.contains(r##"stroke="#e74c3c" stroke-width="6""##));
    }

    #[test]
    fn test_empty_curves_render_nothing() {
        let mut curves = sample_curves();
        curves.samples.clear();
        assert!(render_svg(&curves, &PlotOptions::default()).is_empty());
    }

    #[test]
    fn test_title_override() {
        let options = PlotOptions::new().with_title("Kitchen convergence");
        let svg = render_svg(&sample_curves(), &options);
        assert!(svg.contains("Kitchen convergence"));
        assert!(!svg.contains("Cuisine01 (svd, range)"));
    }

    #[test]
    fn test_fixed_y_bounds_drive_ticks() {
        let options = PlotOptions::new().with_y_bounds(0.0, 1.0);
        let svg = render_svg(&sample_curves(), &options);
        assert!(svg.contains(">0.20</text>"));
        assert!(svg.contains(">1.00</text>"));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let options = PlotOptions::new().with_y_bounds(1.0, 0.0);
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_svg_uses_canonical_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let curves = sample_curves();
        let path = write_svg(&curves, &PlotOptions::default(), dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Cuisine01_svd_10_range_0.svg"
        );
        assert!(path.exists());
    }

    #[test]
    fn test_write_svg_rejects_empty_curves() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut curves = sample_curves();
        curves.samples.clear();

        let err = write_svg(&curves, &PlotOptions::default(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }
}
