use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::common::{BoxRejection, CoordinateSpace, DefectClass, OverlayBox};

/// One defect found in one analyzed frame, in the shape the inference endpoint returns it.
///
/// Decoding never fails on a single bad field: a missing or mistyped class or
/// confidence falls back to empty/zero, and box coordinates are kept as sent so
/// a malformed box only costs its own detection at render time.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class", default, deserialize_with = "lenient_label")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f32,
    #[serde(default, deserialize_with = "lenient_coords", skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f32>>,
    #[serde(default, deserialize_with = "lenient_coords", skip_serializing_if = "Option::is_none")]
    pub normalized_bbox: Option<Vec<f32>>,
}

/// Why a detection produced no overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingBox,
    /// The box did not carry exactly four coordinates.
    WrongLength(usize),
    Rejected(BoxRejection),
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).map_or(0., |n| n as f32))
}

/// Non-numeric entries become NaN, anything that is not an array becomes an empty box.
fn lenient_coords<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items.iter().map(|v| v.as_f64().map_or(f32::NAN, |n| n as f32)).collect()
        ),
        Some(_) => Some(Vec::new()),
    })
}

impl Detection {
    pub fn new(class_name: &str, confidence: f32) -> Self {
        Self {
            class_name: class_name.to_string(),
            confidence,
            bbox: None,
            normalized_bbox: None,
        }
    }

    /// Sets the absolute pixel box `(x1, y1, x2, y2)`.
    pub fn with_bbox(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Some(vec![x1, y1, x2, y2]);
        self
    }

    /// Sets the normalized box `(x1, y1, x2, y2)`, each a fraction of the frame.
    pub fn with_normalized_bbox(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.normalized_bbox = Some(vec![x1, y1, x2, y2]);
        self
    }

    pub fn defect_class(&self) -> Option<DefectClass> {
        DefectClass::from_label(&self.class_name)
    }

    pub fn get_label(&self) -> String {
        if self.class_name.is_empty() {
            "Unknown".to_string()
        } else {
            self.class_name.clone()
        }
    }

    /// Confidence as a whole percentage, `round(confidence * 100)`.
    pub fn confidence_percent(&self) -> u32 {
        let conf = if self.confidence.is_nan() { 0. } else { self.confidence.clamp(0., 1.) };
        (conf * 100.).round() as u32
    }

    /// Resolves this detection's box into normalized coordinates.
    ///
    /// A `normalized_bbox` always wins when present. Otherwise the pixel `bbox` is
    /// divided by the reference frame, or taken as-is when the caller asserts the
    /// batch is already normalized.
    pub fn resolve_box(&self, space: &CoordinateSpace) -> Result<OverlayBox, SkipReason> {
        let raw = match (&self.normalized_bbox, &self.bbox, space) {
            (Some(norm), _, _) => OverlayBox::from_xyxy(corners(norm)?),
            (None, Some(px), CoordinateSpace::Reference(frame)) => OverlayBox::from_pixels(corners(px)?, *frame),
            (None, Some(px), CoordinateSpace::Normalized) => OverlayBox::from_xyxy(corners(px)?),
            (None, None, _) => return Err(SkipReason::MissingBox),
        };
        raw.sanitize().map_err(SkipReason::Rejected)
    }

    /// The box `resolve_box` would use, as received.
    pub fn raw_box(&self) -> Option<&[f32]> {
        self.normalized_bbox.as_deref().or(self.bbox.as_deref())
    }
}

fn corners(coords: &[f32]) -> Result<[f32; 4], SkipReason> {
    <[f32; 4]>::try_from(coords).map_err(|_| SkipReason::WrongLength(coords.len()))
}
