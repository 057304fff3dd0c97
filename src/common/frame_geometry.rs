use serde::{Deserialize, Serialize};
use crate::error::ScanError;

/// Pixel dimensions of the frame a detection batch was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    width: u32,
    height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ScanError> {
        if width == 0 || height == 0 {
            return Err(ScanError::InvalidFrameSize(width, height));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// Coordinate convention a batch is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSpace {
    /// Plain `bbox` values are pixels relative to this frame.
    Reference(FrameSize),
    /// The caller asserts every box is already normalized.
    Normalized,
}

impl From<FrameSize> for CoordinateSpace {
    fn from(frame: FrameSize) -> Self {
        CoordinateSpace::Reference(frame)
    }
}

impl CoordinateSpace {
    pub fn reference(width: u32, height: u32) -> Result<Self, ScanError> {
        Ok(CoordinateSpace::Reference(FrameSize::new(width, height)?))
    }

    pub fn frame(&self) -> Option<FrameSize> {
        match self {
            CoordinateSpace::Reference(frame) => Some(*frame),
            CoordinateSpace::Normalized => None,
        }
    }
}
