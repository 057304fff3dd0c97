use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use crate::common::{CapturedFrame, DetectionBatch};
use crate::data::{OverlayState, OverlayStore};
use crate::detection_runners::{DetectionSource, FrameSource};
use crate::error::ScanError;
use crate::utils;

/// Handle to the live capture loop.
///
/// While running, every `period` the loop captures a frame, submits it and, on
/// success, replaces the batch in the [`OverlayStore`]. Each cycle is awaited inside
/// the task, so a slow response delays the next capture instead of overlapping it;
/// ticks that fall due meanwhile are skipped. Failed cycles leave the previous batch
/// in place.
pub struct LiveScanner {
    frames: Arc<dyn FrameSource>,
    detector: Arc<dyn DetectionSource>,
    store: OverlayStore,
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LiveScanner {
    pub fn new<F, D>(frames: F, detector: D, period: Duration) -> Self
    where
        F: FrameSource + 'static,
        D: DetectionSource + 'static,
    {
        Self {
            frames: Arc::new(frames),
            detector: Arc::new(detector),
            store: OverlayStore::new(),
            period,
            task: Mutex::new(None),
        }
    }

    /// Publishes into an existing store instead of a private one.
    pub fn with_store(mut self, store: OverlayStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.store.subscribe()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Starts scanning. Returns `Ok(false)` when a scan is already running.
    ///
    /// Must be called from inside a tokio runtime.
    ///
    /// # Errors
    /// * `ScanError::DeviceUnavailable` if the frame source reports no device.
    /// * `ScanError::NoRuntime` outside a runtime.
    pub fn start(&self) -> Result<bool, ScanError> {
        let mut task = self.task.lock();
        if task.as_ref().map_or(false, |handle| !handle.is_finished()) {
            log::debug!("Scan already running, start ignored");
            return Ok(false);
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ScanError::NoRuntime)?;

        if let Err(err) = self.frames.probe() {
            if let ScanError::DeviceUnavailable(reason) = &err {
                self.store.device_lost(self.store.generation(), reason);
            }
            log::error!("Cannot start scanning: {}", err);
            return Err(err);
        }

        let generation = self.store.begin();
        let cycle = ScanCycle {
            frames: self.frames.clone(),
            detector: self.detector.clone(),
            store: self.store.clone(),
            generation,
        };
        *task = Some(runtime.spawn(run_scan_loop(cycle, self.period)));

        log::info!("Live scan started (generation {}, every {:?}, detector {})",
                   generation, self.period, self.detector.name());
        Ok(true)
    }

    /// Stops scanning and clears the overlay. Returns whether a scan was running.
    ///
    /// The generation is bumped before the task is cancelled, so a response that is
    /// still in flight can never be applied to the cleared overlay.
    pub fn stop(&self) -> bool {
        let mut task = self.task.lock();
        let generation = self.store.reset();
        let was_running = match task.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        };
        if was_running {
            log::info!("Live scan stopped (now generation {})", generation);
        }
        was_running
    }

    /// Captures and analyzes a single still frame, stopping any live scan first.
    pub async fn capture_still(&self) -> Result<(CapturedFrame, DetectionBatch), ScanError> {
        self.stop();
        let frame = self.frames.capture()?;
        let batch = self.detector.detect(&frame).await?;
        log::info!("Still capture analyzed: {} detection(s)", batch.len());
        Ok((frame, batch))
    }
}

impl Drop for LiveScanner {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
            self.store.reset();
        }
    }
}

struct ScanCycle {
    frames: Arc<dyn FrameSource>,
    detector: Arc<dyn DetectionSource>,
    store: OverlayStore,
    generation: u64,
}

async fn run_scan_loop(cycle: ScanCycle, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tick: u64 = 0;

    loop {
        ticker.tick().await;
        if cycle.store.generation() != cycle.generation {
            break;
        }
        tick += 1;
        let cycle_time = Instant::now();

        let frame = match cycle.frames.capture() {
            Ok(frame) => frame,
            Err(ScanError::DeviceUnavailable(reason)) => {
                log::error!("Capture device lost during scan: {}", reason);
                cycle.store.device_lost(cycle.generation, &reason);
                break;
            }
            Err(err) => {
                log::debug!("Tick {} skipped, capture failed: {}", tick, err);
                continue;
            }
        };
        let elapsed = utils::trace("SCAN", "Capture", cycle_time, Duration::ZERO);

        match cycle.detector.detect(&frame).await {
            Ok(batch) => {
                let count = batch.len();
                if !cycle.store.apply(cycle.generation, batch) {
                    log::debug!("Tick {} response arrived after stop, discarded", tick);
                    break;
                }
                log::trace!("Tick {} applied {} detection(s)", tick, count);
            }
            Err(err) if err.is_transient() => {
                log::debug!("Tick {} dropped: {}", tick, err);
            }
            Err(err) => {
                log::warn!("Tick {} failed: {}", tick, err);
            }
        }
        utils::trace("SCAN", "Detect", cycle_time, elapsed);
    }
}
