//! Mock notification sink for testing.

use crate::providers::{NotificationSink, UnslotNotice};
use slotboard_core::{Result, SlotboardError};
use std::sync::{Arc, Mutex};

/// Mock notification sink.
///
/// Records every delivered notice instead of sending anything.
#[derive(Debug, Clone)]
pub struct MockNotificationSink {
    notices: Arc<Mutex<Vec<UnslotNotice>>>,
    /// Whether to simulate success or failure.
    pub should_succeed: bool,
}

impl MockNotificationSink {
    /// Create a sink that accepts every notice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
            should_succeed: true,
        }
    }

    /// Create a sink whose deliveries fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            notices: Arc::new(Mutex::new(Vec::new())),
            should_succeed: false,
        }
    }

    /// All notices delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<UnslotNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Default for MockNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for MockNotificationSink {
    async fn notify_unslotted(&self, notice: UnslotNotice) -> Result<()> {
        if !self.should_succeed {
            return Err(SlotboardError::internal("notification delivery failed"));
        }
        self.notices.lock().unwrap().push(notice);
        Ok(())
    }
}
