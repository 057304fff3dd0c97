use std::path::Path;
use std::sync::Arc;
use parking_lot::Mutex;
use crate::common::CapturedFrame;
use crate::error::ScanError;

/// Supplier of frames for the scan loop: a camera, an uploaded still, a test double.
pub trait FrameSource: Send + Sync {
    /// Grabs the current frame.
    ///
    /// `ScanError::DeviceUnavailable` ends scanning; any other error only skips the tick.
    fn capture(&self) -> Result<CapturedFrame, ScanError>;

    /// Checks the device before scanning starts.
    fn probe(&self) -> Result<(), ScanError> {
        Ok(())
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Arc<T> {
    fn capture(&self) -> Result<CapturedFrame, ScanError> {
        (**self).capture()
    }

    fn probe(&self) -> Result<(), ScanError> {
        (**self).probe()
    }
}

/// Serves the same uploaded image on every capture.
#[derive(Debug, Clone)]
pub struct StillImageSource {
    frame: CapturedFrame,
}

impl StillImageSource {
    pub fn new(frame: CapturedFrame) -> Self {
        Self { frame }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let frame = CapturedFrame::open(path.as_ref())?;
        log::info!("Loaded still image {} ({}x{})", path.as_ref().display(), frame.img_width, frame.img_height);
        Ok(Self::new(frame))
    }

    pub fn frame(&self) -> &CapturedFrame {
        &self.frame
    }
}

impl FrameSource for StillImageSource {
    fn capture(&self) -> Result<CapturedFrame, ScanError> {
        Ok(self.frame.clone())
    }
}

#[derive(Debug, Default)]
struct FrameSlot {
    latest: Option<CapturedFrame>,
    disconnected: Option<String>,
}

/// Latest-frame slot written by a camera thread and read by the scan loop.
#[derive(Debug, Clone, Default)]
pub struct SharedFrameSource {
    slot: Arc<Mutex<FrameSlot>>,
}

impl SharedFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the latest frame. Older frames are never queued.
    pub fn publish(&self, frame: CapturedFrame) {
        let mut slot = self.slot.lock();
        slot.latest = Some(frame);
        slot.disconnected = None;
    }

    /// Marks the device as gone; subsequent captures fail with `DeviceUnavailable`.
    pub fn disconnect(&self, reason: &str) {
        let mut slot = self.slot.lock();
        slot.latest = None;
        slot.disconnected = Some(reason.to_string());
    }

    pub fn is_connected(&self) -> bool {
        self.slot.lock().disconnected.is_none()
    }
}

impl FrameSource for SharedFrameSource {
    fn capture(&self) -> Result<CapturedFrame, ScanError> {
        let slot = self.slot.lock();
        if let Some(reason) = &slot.disconnected {
            return Err(ScanError::DeviceUnavailable(reason.clone()));
        }
        slot.latest.clone().ok_or(ScanError::NoFrame)
    }

    fn probe(&self) -> Result<(), ScanError> {
        match &self.slot.lock().disconnected {
            Some(reason) => Err(ScanError::DeviceUnavailable(reason.clone())),
            None => Ok(()),
        }
    }
}
