mod filesystem_access;
mod overlay_store;
mod scan_events;
mod scan_record;
mod scan_summary;

pub use filesystem_access::FsAccess;
pub use overlay_store::{OverlayState, OverlayStore, ScannerStatus};
pub use scan_events::{ScanEvent, ScanEvents};
pub use scan_record::{CompanyHistoryFilter, SavedScan, ScanOwner, ScanRecord, TimeRange};
pub use scan_summary::{ClassCount, ScanSummary};
