//! `sst-webmap`: turn the NOAA ERSST v5 NetCDF file into web-ready files.
//!
//! Subcommands:
//! - `download`: fetch the dataset if it is not on disk
//! - `json`: metadata plus centidegree JSON (plain and gzip)
//! - `binary`: metadata plus a flat uint8 grid
//! - `animate`: a self-contained HTML page with an animated map

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use converter::{ensure_dataset, ConverterConfig, SummaryReport};
use grid_processor::{convert_to_binary, convert_to_json};
use netcdf_parser::{silence_hdf5_errors, SstDataset};
use renderer::{Animation, AnimationOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sst-webmap")]
#[command(about = "Convert ERSST sea surface temperature data to web formats")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// NetCDF input file (overrides data.file)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Data variable name (overrides data.variable)
    #[arg(long, global = true)]
    variable: Option<String>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download the dataset unless it already exists
    Download {
        /// Source URL (overrides data.url)
        #[arg(long)]
        url: Option<String>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Write metadata.json and sst_data.json[.gz]
    Json {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Keep every n-th month (12 = yearly)
        #[arg(long)]
        time_step: Option<usize>,

        /// Skip the uncompressed data file
        #[arg(long)]
        no_plain: bool,

        /// Skip the gzip data file
        #[arg(long)]
        no_gzip: bool,
    },

    /// Write metadata.json and sst_data.bin
    Binary {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Build the animated HTML map, downloading the dataset if needed
    Animate {
        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep every n-th month
        #[arg(long)]
        time_step: Option<usize>,

        /// Keep every n-th row and column
        #[arg(long)]
        spatial_subsample: Option<usize>,

        /// Delay between frames in milliseconds
        #[arg(long)]
        frame_duration_ms: Option<u64>,

        /// Hide the download progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ConverterConfig::from_yaml(path)?;
            config.apply_env();
            config
        }
        None => ConverterConfig::from_env(),
    };
    if let Some(file) = cli.data_file {
        config.data.file = file;
    }
    if let Some(variable) = cli.variable {
        config.data.variable = variable;
    }

    match cli.command {
        Commands::Download { url, no_progress } => {
            if let Some(url) = url {
                config.data.url = url;
            }
            config.validate()?;

            let outcome = ensure_dataset(&config.data.url, &config.data.file, !no_progress).await?;
            println!(
                "{}: {:.1} MB",
                config.data.file.display(),
                outcome.bytes() as f64 / (1024.0 * 1024.0)
            );
        }
        Commands::Json {
            output_dir,
            time_step,
            no_plain,
            no_gzip,
        } => {
            if let Some(dir) = output_dir {
                config.json.output_dir = dir;
            }
            if let Some(step) = time_step {
                config.json.time_step = step;
            }
            config.json.write_plain &= !no_plain;
            config.json.write_gzip &= !no_gzip;
            config.validate()?;

            let dataset = open_dataset(&config.data.file, &config.data.variable)?;
            let report = convert_to_json(&dataset, &config.json)
                .context("JSON conversion failed")?;
            println!("{}", SummaryReport::format_conversion("JSON output", &report));
        }
        Commands::Binary { output_dir } => {
            if let Some(dir) = output_dir {
                config.binary.output_dir = dir;
            }
            config.validate()?;

            let dataset = open_dataset(&config.data.file, &config.data.variable)?;
            let report = convert_to_binary(&dataset, &config.binary)
                .context("Binary conversion failed")?;
            println!("{}", SummaryReport::format_conversion("Binary output", &report));
        }
        Commands::Animate {
            output,
            time_step,
            spatial_subsample,
            frame_duration_ms,
            no_progress,
        } => {
            let anim = &mut config.animation;
            if let Some(path) = output {
                anim.output_file = path;
            }
            if let Some(step) = time_step {
                anim.time_step = step;
            }
            if let Some(step) = spatial_subsample {
                anim.spatial_subsample = step;
            }
            if let Some(ms) = frame_duration_ms {
                anim.frame_duration_ms = ms;
            }
            config.validate()?;

            ensure_dataset(&config.data.url, &config.data.file, !no_progress).await?;
            let dataset = open_dataset(&config.data.file, &config.data.variable)?;

            let anim = &config.animation;
            let options = AnimationOptions {
                title_prefix: anim.title.clone(),
                frame_duration_ms: anim.frame_duration_ms,
                time_step: anim.time_step,
                spatial_subsample: anim.spatial_subsample,
                encoding: anim.encoding,
                ..Default::default()
            };
            let animation =
                Animation::from_source(&dataset, options).context("Failed to build animation")?;
            let file = animation
                .write_html(&anim.output_file)
                .context("Failed to write animation")?;
            println!(
                "{}",
                SummaryReport::format_animation(&file, animation.shape())
            );
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

/// Open the dataset and log what it contains.
fn open_dataset(path: &Path, variable: &str) -> Result<SstDataset> {
    silence_hdf5_errors();

    let dataset = SstDataset::open(path, variable)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let summary = dataset.describe();
    info!(
        variables = ?summary.variables,
        dimensions = ?summary.dimensions,
        time_range = ?summary.time_range,
        "Loaded dataset"
    );
    eprintln!("{}", SummaryReport::format_dataset(&summary));

    Ok(dataset)
}
