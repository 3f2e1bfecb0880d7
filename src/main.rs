use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};

use snapfilter::{
    config::Config,
    export::{BatchStatus, ExportEngine, ExportSource},
    filters::{FilterId, FilterSelection},
    naming::MediaKind,
    preview::preview_with_config,
    raster::Raster,
};

#[derive(Parser)]
#[command(
    name = "snapfilter",
    version,
    about = "Export a photo or video once per filter",
    long_about = "Snapfilter applies a selection of filters to a captured photo or recorded video and saves one timestamped file per filter, running the exports concurrently."
)]
struct Cli {
    /// Captured photo (PNG, JPEG) or recorded video (MP4, MOV, MKV, ...)
    #[arg(short, long, required_unless_present = "list_filters")]
    input: Option<PathBuf>,

    /// Comma separated filters; defaults to every built-in filter
    #[arg(short, long)]
    filters: Option<String>,

    /// Output directory (overrides the configured one)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a scaled preview of the first selected filter here and exit
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Print the available filters and exit
    #[arg(long)]
    list_filters: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    config.validate()?;

    let engine = ExportEngine::new(&config);

    if cli.list_filters {
        for filter in engine.registry().available_filters() {
            let Some(kernel) = engine.registry().get(&filter) else {
                continue;
            };
            let grain = if kernel.metadata().deterministic { "" } else { " (random grain)" };
            println!("{:<10} {}{}", filter.token(), kernel.description(), grain);
        }
        return Ok(());
    }

    let input = cli
        .input
        .context("--input is required unless --list-filters is given")?;
    let kind = MediaKind::from_path(&input)
        .with_context(|| format!("Unsupported input file type: {:?}", input))?;

    let selection = match &cli.filters {
        Some(list) => list.parse::<FilterSelection>()?,
        None => FilterId::KNOWN
            .iter()
            .filter(|id| **id != FilterId::None)
            .cloned()
            .collect(),
    };
    for filter in selection.iter().filter(|id| !id.is_known()) {
        warn!("Unknown filter '{}' will be exported unfiltered", filter);
    }

    if let Some(preview_path) = &cli.preview {
        if kind != MediaKind::Image {
            bail!("Previews are only available for photos");
        }
        let filter = selection.iter().next().cloned().unwrap_or(FilterId::None);
        let source = Raster::open(&input)?;
        let scaled = preview_with_config(engine.registry(), &source, &filter, &config.preview);
        scaled.save_png(preview_path)?;
        info!("Preview of {} saved to {:?}", filter, preview_path);
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(|| config.export.output_dir.clone());
    info!("Input: {:?}", input);
    info!("Output: {:?}", output);
    info!("Filters: {}", selection.iter().map(|f| f.token()).collect::<Vec<_>>().join(", "));

    let handle = match kind {
        MediaKind::Image => {
            let raster = Raster::open(&input)?;
            engine
                .export(ExportSource::Image(&raster), &selection, &output)
                .await?
        }
        MediaKind::Video => {
            engine
                .export(ExportSource::Video(&input), &selection, &output)
                .await?
        }
    };

    let report = handle.wait().await;
    for path in report.saved_paths() {
        println!("{}", path.display());
    }
    for failure in report.failures() {
        if let Err(e) = &failure.result {
            warn!("{}: {}", failure.filter, e);
        }
    }

    let status = report.status();
    println!("{}", status);
    if status == BatchStatus::AllFailed {
        bail!("{}", status);
    }
    Ok(())
}
