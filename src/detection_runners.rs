mod detection_source;
mod frame_source;
mod history_client;
mod http_detector;
mod live_scanner;

pub use detection_source::DetectionSource;
pub use frame_source::{FrameSource, SharedFrameSource, StillImageSource};
pub use history_client::{parse_history, HistoryClient, MAX_HISTORY_LIMIT};
pub use http_detector::{parse_detections, HttpDetector, PREDICT_ENDPOINT};
pub use live_scanner::LiveScanner;
