use std::sync::Arc;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;

/// Notifications about the scan history, consumed by views that show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    ScanSaved { id: String },
    ScanDeleted { id: String },
}

/// Publish/subscribe bus for [`ScanEvent`]s.
///
/// Cheap to clone; every clone publishes to the same set of subscribers. Subscribers whose
/// receiver has been dropped are pruned on the next publish.
#[derive(Debug, Clone, Default)]
pub struct ScanEvents {
    subscribers: Arc<Mutex<Vec<Sender<ScanEvent>>>>,
}

impl ScanEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<ScanEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Delivers `event` to every live subscriber and returns how many received it.
    pub fn publish(&self, event: ScanEvent) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
        log::debug!("Published {:?} to {} subscriber(s)", event, subscribers.len());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
