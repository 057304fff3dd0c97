//! live_scan - run the live overlay loop against a still image and print render directives.

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use defect_overlay::common::{CoordinateSpace, ScanConfig};
use defect_overlay::detection_runners::StillImageSource;
use defect_overlay::data::ScannerStatus;
use defect_overlay::OverlayRenderer;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image to submit on every tick.
    image: PathBuf,
    /// Inference API base url (overrides config file).
    #[arg(long, env = "DEFECT_API_URL")]
    api_url: Option<String>,
    /// Poll interval in milliseconds (overrides config file).
    #[arg(long)]
    interval_ms: Option<u64>,
    /// How long to scan before stopping, in seconds.
    #[arg(long, default_value_t = 5)]
    seconds: u64,
    /// Read a config file instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScanConfig::from_file(path)?.with_env_overrides()?,
        None => ScanConfig::load()?,
    };
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(ms) = args.interval_ms {
        config.poll_interval_ms = ms;
    }
    log::info!("Scan config:\n{}", config.to_string());

    let frames = StillImageSource::open(&args.image)
        .with_context(|| format!("failed to load {}", args.image.display()))?;
    // Boxes come back in the uploaded image's own pixel space.
    let renderer = OverlayRenderer::new(CoordinateSpace::Reference(frames.frame().frame_size()?))
        .with_default_color(&config.default_color);

    let scanner = defect_overlay::init_live_scanner(&config, frames)?;
    let mut updates = scanner.subscribe();
    scanner.start()?;

    let deadline = tokio::time::sleep(Duration::from_secs(args.seconds));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if let ScannerStatus::DeviceUnavailable(reason) = &state.status {
                    log::error!("Scanning stopped: {}", reason);
                    break;
                }
                let directives = renderer.render(&state.batch);
                println!("{}", serde_json::to_string(&directives)?);
            }
        }
    }

    scanner.stop();
    Ok(())
}
