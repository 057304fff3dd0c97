use std::sync::Arc;
use tokio::sync::watch;
use crate::common::DetectionBatch;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ScannerStatus {
    #[default]
    Idle,
    Scanning,
    /// The capture device went away; scanning controls should be disabled.
    DeviceUnavailable(String),
}

/// What the overlay view renders from.
#[derive(Debug, Default, Clone)]
pub struct OverlayState {
    pub generation: u64,
    pub status: ScannerStatus,
    pub batch: Arc<DetectionBatch>,
}

impl OverlayState {
    pub fn is_scanning(&self) -> bool {
        self.status == ScannerStatus::Scanning
    }
}

/// Observable holder of the current detection batch.
///
/// Every start or stop bumps the generation. Updates are tagged with the generation
/// they were issued under and dropped when it is no longer current, which keeps a
/// response that lands after `stop` off the cleared overlay. Each operation is a
/// single atomic modification of the watched value.
#[derive(Debug, Clone)]
pub struct OverlayStore {
    tx: Arc<watch::Sender<OverlayState>>,
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(OverlayState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> OverlayState {
        self.tx.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn current_batch(&self) -> Arc<DetectionBatch> {
        self.tx.borrow().batch.clone()
    }

    /// Starts a new scanning generation with an empty overlay and returns its number.
    pub fn begin(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.status = ScannerStatus::Scanning;
            state.batch = Arc::new(DetectionBatch::empty());
            generation = state.generation;
        });
        generation
    }

    /// Replaces the batch if `generation` is still current. Returns whether it was applied.
    pub fn apply(&self, generation: u64, batch: DetectionBatch) -> bool {
        self.tx.send_if_modified(move |state| {
            if state.generation != generation || state.status != ScannerStatus::Scanning {
                return false;
            }
            state.batch = Arc::new(batch);
            true
        })
    }

    /// Ends the current generation and clears the overlay.
    pub fn reset(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.status = ScannerStatus::Idle;
            state.batch = Arc::new(DetectionBatch::empty());
            generation = state.generation;
        });
        generation
    }

    /// Marks the device as lost for `generation`, clearing the overlay. Ignored when stale.
    pub fn device_lost(&self, generation: u64, reason: &str) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.generation += 1;
            state.status = ScannerStatus::DeviceUnavailable(reason.to_string());
            state.batch = Arc::new(DetectionBatch::empty());
            true
        })
    }
}
