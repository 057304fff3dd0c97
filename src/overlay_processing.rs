use crate::common::{color_for_label, CoordinateSpace, DetectionBatch, LabelAnchor, PercentRect,
                    RenderDirective, SkipReason, DEFAULT_COLOR};

/// Projects detection batches onto a display surface as percentage rectangles.
///
/// The surface is assumed to show the source frame with "contain" scaling, so a
/// percentage of the frame is the same percentage of the element and resizing the
/// element needs no new projection.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    space: CoordinateSpace,
    default_color: String,
}

impl OverlayRenderer {
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            space,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_default_color(mut self, color: &str) -> Self {
        self.default_color = color.to_string();
        self
    }

    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    /// One directive per renderable detection, in batch order.
    ///
    /// Detections whose geometry cannot be resolved are left out with a warning;
    /// the rest of the batch renders normally.
    pub fn render(&self, batch: &DetectionBatch) -> Vec<RenderDirective> {
        let mut directives = Vec::with_capacity(batch.len());

        for (index, det) in batch.iter().enumerate() {
            let overlay_box = match det.resolve_box(&self.space) {
                Ok(b) => b,
                Err(SkipReason::MissingBox) => {
                    log::warn!("Detection {} ({}) has no bounding box, skipping", index, det.get_label());
                    continue;
                }
                Err(why) => {
                    log::warn!("Detection {} ({}) has malformed box {:?}: {:?}, skipping",
                               index, det.get_label(), det.raw_box(), why);
                    continue;
                }
            };

            let rect = PercentRect::from(&overlay_box);
            directives.push(RenderDirective {
                index,
                rect,
                color: color_for_label(&det.class_name, &self.default_color).to_string(),
                label: format!("{} {}%", det.get_label(), det.confidence_percent()),
                label_anchor: LabelAnchor { left: rect.left, top: rect.top },
                defect_class: det.defect_class(),
            });
        }

        log::trace!("Rendered {} of {} detections", directives.len(), batch.len());
        directives
    }
}
