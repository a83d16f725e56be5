//! despeckle CLI: removes dark speckle noise from a single image.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use despeckle::{Config, ConfigOverrides, Image, PREVIEW_MAX_SIZE, Settings};

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "../config.json";

#[derive(Debug, Parser)]
#[command(name = "despeckle")]
#[command(about = "Remove dark speckle noise from photographs")]
#[command(version)]
struct Cli {
    /// Image to clean.
    #[arg(long)]
    input: PathBuf,

    /// Destination; the format follows the extension.
    #[arg(long)]
    output: PathBuf,

    /// JSON config file. Defaults to ../config.json when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of median passes for the fill image.
    #[arg(long, allow_negative_numbers = true)]
    strength: Option<i32>,

    /// Luminance at or below which pixels may be replaced.
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,

    /// Minimum darkness relative to the local median.
    #[arg(long, allow_negative_numbers = true)]
    delta: Option<i32>,

    /// Window of the local median reference.
    #[arg(long, allow_negative_numbers = true)]
    mask_size: Option<i32>,

    /// Window of the smoothing fill.
    #[arg(long, allow_negative_numbers = true)]
    fill_size: Option<i32>,

    /// Side of the square used to grow the mask.
    #[arg(long, allow_negative_numbers = true)]
    expand: Option<i32>,

    /// Also write a thumbnail of the result here.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Write the effective parameters as JSON.
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// TOML file with last-used parameters; read first, updated after a successful run.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write daily-rotated log files into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            strength: self.strength,
            threshold: self.threshold,
            delta: self.delta,
            expand: self.expand,
            mask_size: self.mask_size,
            fill_size: self.fill_size,
        }
    }

    /// defaults < stored settings < config file < flags
    fn resolve_config(&self, settings: Option<&Settings>) -> Config {
        let base = settings.map(|s| s.config).unwrap_or_default();

        let config_path = match &self.config {
            Some(path) => {
                if !path.exists() {
                    tracing::warn!("Config file {} not found, skipping", path.display());
                }
                path.as_path()
            }
            None => Path::new(DEFAULT_CONFIG_PATH),
        };

        base.merge_file(config_path).with_overrides(&self.overrides())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = common::log_setup::setup_logging(&cli.log_level, cli.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {err:#}");
    }

    match run(&cli) {
        Ok(()) => {
            println!("Processed image: {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut settings = cli.settings.as_deref().map(Settings::load_or_default);
    let config = cli.resolve_config(settings.as_ref());
    tracing::info!("Using {config:?}");

    let image = Image::read_file(&cli.input)
        .with_context(|| format!("Cannot read input image {}", cli.input.display()))?;

    let result = despeckle::denoise_with_mask(&image, &config);

    result
        .image
        .save_file(&cli.output)
        .with_context(|| format!("Cannot write output image {}", cli.output.display()))?;

    if let Some(path) = &cli.preview {
        result
            .image
            .thumbnail(PREVIEW_MAX_SIZE.0, PREVIEW_MAX_SIZE.1)
            .save_file(path)
            .with_context(|| format!("Cannot write preview {}", path.display()))?;
    }

    if let Some(path) = &cli.save_config {
        let json = config.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Cannot write config {}", path.display()))?;
    }

    if let (Some(path), Some(settings)) = (&cli.settings, settings.as_mut()) {
        settings.config = config;
        settings.remember_dir(&cli.output);
        settings
            .save(path)
            .with_context(|| format!("Cannot save settings {}", path.display()))?;
    }

    Ok(())
}
