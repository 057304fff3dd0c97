use serde::{Deserialize, Serialize};
use crate::common::FrameSize;

/// Bounding box in normalized frame coordinates, where `(0, 0)` is the top-left
/// corner of the source frame and `(1, 1)` the bottom-right.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct OverlayBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w: f32,
    pub h: f32,
}

/// Reasons a box cannot be resolved into normalized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxRejection {
    NonFinite,
    Inverted,
}

impl OverlayBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    /// Builds a box from `[x1, y1, x2, y2]` as it comes over the wire.
    pub fn from_xyxy(coords: [f32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    /// Builds a normalized box from absolute pixel coordinates measured against `frame`.
    pub fn from_pixels(coords: [f32; 4], frame: FrameSize) -> Self {
        let (fw, fh) = frame.as_f32();
        Self::new(coords[0] / fw, coords[1] / fh, coords[2] / fw, coords[3] / fh)
    }

    /// Returns the bounding box coordinates as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Clamps the box into the unit square.
    ///
    /// Coordinates outside `[0, 1]` are pulled back onto the frame edge. A box whose
    /// corners are swapped, or that contains NaN/infinite values, is rejected; a box
    /// whose corners coincide is kept with zero extent.
    ///
    /// # Returns
    ///
    /// The clamped `OverlayBox`, or the reason it was rejected.
    pub fn sanitize(&self) -> Result<Self, BoxRejection> {
        let (x1, y1, x2, y2) = self.xy1_xy2();
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(BoxRejection::NonFinite);
        }
        if x1 > x2 || y1 > y2 {
            return Err(BoxRejection::Inverted);
        }

        Ok(Self::new(
            x1.clamp(0., 1.),
            y1.clamp(0., 1.),
            x2.clamp(0., 1.),
            y2.clamp(0., 1.),
        ))
    }
}
