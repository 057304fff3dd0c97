use serde::{Deserialize, Serialize};
use crate::common::{DefectClass, OverlayBox};

/// Rectangle in percent of the displayed surface, ready for absolute positioning.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&OverlayBox> for PercentRect {
    fn from(b: &OverlayBox) -> Self {
        Self {
            left: b.x1 * 100.,
            top: b.y1 * 100.,
            width: b.w * 100.,
            height: b.h * 100.,
        }
    }
}

impl PercentRect {
    /// CSS-style declaration, e.g. `left: 7.81%; top: 6.94%; width: 15.63%; height: 13.89%`.
    pub fn to_css(&self) -> String {
        format!("left: {:.2}%; top: {:.2}%; width: {:.2}%; height: {:.2}%",
                self.left, self.top, self.width, self.height)
    }
}

/// Point the label is pinned to, in the same percent units as the rectangle.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub left: f32,
    pub top: f32,
}

/// Everything a view needs to draw one detection over the video or image element.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDirective {
    /// Position of the source detection in its batch.
    pub index: usize,
    pub rect: PercentRect,
    pub color: String,
    pub label: String,
    pub label_anchor: LabelAnchor,
    pub defect_class: Option<DefectClass>,
}

impl RenderDirective {
    /// Translucent fill, the stroke color with a `33` alpha suffix.
    pub fn fill_color(&self) -> String {
        format!("{}33", self.color)
    }
}
