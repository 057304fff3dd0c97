mod utils;
mod overlay_processing;
pub mod error;
pub mod data;
pub mod detection_runners;
pub mod common;

use std::time::Duration;
use crate::common::{CoordinateSpace, DetectionBatch, RenderDirective, ScanConfig};
use crate::detection_runners::{HttpDetector, FrameSource, LiveScanner};

pub use crate::error::ScanError;
pub use crate::overlay_processing::OverlayRenderer;

pub type Result<T, E = ScanError> = std::result::Result<T, E>;

/// Renders `batch` against `space` with the default palette.
pub fn render_overlay(batch: &DetectionBatch, space: CoordinateSpace) -> Vec<RenderDirective> {
    OverlayRenderer::new(space).render(batch)
}

/// Builds the renderer described by `config`: its reference frame and fallback color.
pub fn init_renderer(config: &ScanConfig) -> anyhow::Result<OverlayRenderer> {
    let renderer = OverlayRenderer::new(config.reference_space()?)
        .with_default_color(&config.default_color);
    Ok(renderer)
}

/// Builds a live scanner that posts frames from `frames` to the configured inference endpoint.
pub fn init_live_scanner<F: FrameSource + 'static>(config: &ScanConfig, frames: F) -> anyhow::Result<LiveScanner> {
    config.validate()?;
    let detector = HttpDetector::new(config)?;
    log::info!("Initializing live scanner against {}", detector.predict_url());
    Ok(LiveScanner::new(frames, detector, Duration::from_millis(config.poll_interval_ms)))
}
