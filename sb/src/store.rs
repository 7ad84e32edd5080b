//! Single-slot holder for the most recent share

use tracing::debug;

use crate::payload::SharePayload;

/// Holds zero or one pending payload
///
/// Newest wins: `set` overwrites whatever is pending. Only the bridge mutates
/// the store; consumers go through `ShareBridge::clear`.
#[derive(Debug, Default)]
pub struct ShareEventStore {
    pending: Option<SharePayload>,
}

impl ShareEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending payload, returning the one it displaced
    pub fn set(&mut self, payload: SharePayload) -> Option<SharePayload> {
        debug!(len = payload.text().len(), "ShareEventStore::set: called");
        self.pending.replace(payload)
    }

    /// Read without consuming
    pub fn get(&self) -> Option<&SharePayload> {
        self.pending.as_ref()
    }

    /// Drop the pending payload, if any
    pub fn clear(&mut self) {
        debug!(was_pending = self.pending.is_some(), "ShareEventStore::clear: called");
        self.pending = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
