mod captured_frame;
mod defect_class;
mod detection;
mod detection_batch;
mod frame_geometry;
mod overlay_box;
mod render_directive;
mod scan_config;

pub use captured_frame::*;
pub use defect_class::*;
pub use detection::*;
pub use detection_batch::*;
pub use frame_geometry::*;
pub use overlay_box::*;
pub use render_directive::*;
pub use scan_config::*;
