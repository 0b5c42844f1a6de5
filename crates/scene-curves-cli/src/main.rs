//! scene-curves CLI - feature curve extraction for progressive renders

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

/// Feature curve selection and plotting for progressively rendered scenes.
#[derive(Parser)]
#[command(name = "scene-curves")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, normalize, and plot feature curves for one scene
    Plot(PlotArgs),

    /// List the rendered images of a scene directory
    Scan {
        /// Scene directory to scan
        scene: PathBuf,

        /// File-name marker for rendered images
        #[arg(long, default_value = ".png")]
        marker: String,

        /// Print the scan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect a threshold table
    Thresholds {
        /// Threshold table file (scene;t1;...;tN records)
        path: PathBuf,

        /// Show the zones of a single scene
        #[arg(long)]
        scene: Option<String>,

        /// Keep scenes that are excluded by default
        #[arg(long)]
        include_excluded: bool,
    },
}

/// Arguments for the `plot` command.
#[derive(Args)]
pub struct PlotArgs {
    /// Scene directory containing rendered images
    pub scene: PathBuf,

    /// Threshold table file (scene;t1;...;tN records)
    #[arg(short, long)]
    pub thresholds: PathBuf,

    /// Feature to compute (svd, svd_log, svd_channel_mean)
    #[arg(short, long, default_value = "svd")]
    pub feature: String,

    /// Normalization mode (raw, self, range)
    #[arg(short, long, default_value = "raw")]
    pub mode: String,

    /// Component window applied to each vector, as begin,end
    #[arg(long, default_value = "0,200")]
    pub interval: String,

    /// Inclusive quality-index range, as begin,end
    #[arg(long, default_value = "0,900")]
    pub indices: String,

    /// Keep images whose quality index is a multiple of this step
    #[arg(long, default_value_t = 10)]
    pub step: u32,

    /// Apply the component window before min/max tracking
    #[arg(long)]
    pub early_slice: bool,

    /// Fixed chart y bounds, as low,high (defaults to the data bounds)
    #[arg(long)]
    pub ylim: Option<String>,

    /// Chart title override
    #[arg(long)]
    pub label: Option<String>,

    /// Output directory for the chart and reports
    #[arg(short, long, default_value = "curves")]
    pub output: PathBuf,

    /// Also write the full run as pretty-printed JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the samples as long-form CSV
    #[arg(long)]
    pub csv: bool,

    /// Extract features one image at a time
    #[arg(long)]
    pub sequential: bool,

    /// File-name marker for rendered images
    #[arg(long, default_value = ".png")]
    pub marker: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Plot(args) => commands::plot::run(args, cli.verbose),
        Commands::Scan {
            scene,
            marker,
            json,
        } => commands::scan::run(&scene, &marker, json, cli.verbose),
        Commands::Thresholds {
            path,
            scene,
            include_excluded,
        } => commands::thresholds::run(&path, scene.as_deref(), include_excluded, cli.verbose),
    }
}
