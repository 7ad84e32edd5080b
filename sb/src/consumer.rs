//! Push side of the bridge: the consumer capability and a channel-backed impl

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Notification pushed to an attached consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareNotification {
    /// Event name, `onShareText` unless configured otherwise
    pub event: String,
    /// Shared text, verbatim
    pub text: String,
}

/// A live listener that can receive share notifications
///
/// Delivery is fire-and-forget: `notify` must not block and there is no
/// acknowledgement. A consumer that reports itself inactive is skipped and the
/// payload stays pull-able.
pub trait ShareConsumer: Send {
    fn notify(&self, notification: &ShareNotification);

    /// Whether the consumer can currently receive pushes
    fn is_active(&self) -> bool {
        true
    }
}

/// Consumer backed by an unbounded tokio channel
///
/// Becomes inactive once the receiving end is dropped, which is how a torn
/// down runtime shows up without an explicit detach.
pub struct ChannelConsumer {
    tx: mpsc::UnboundedSender<ShareNotification>,
}

impl ChannelConsumer {
    pub fn new(tx: mpsc::UnboundedSender<ShareNotification>) -> Self {
        Self { tx }
    }

    /// Create a consumer together with the receiver the runtime reads from
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<ShareNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ShareConsumer for ChannelConsumer {
    fn notify(&self, notification: &ShareNotification) {
        debug!(event = %notification.event, "ChannelConsumer::notify: called");
        // Receiver gone means the runtime went away; the store still has it
        let _ = self.tx.send(notification.clone());
    }

    fn is_active(&self) -> bool {
        !self.tx.is_closed()
    }
}
