//! ShareBridge - mediates between host share events and the consumer runtime

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::consumer::{ShareConsumer, ShareNotification};
use crate::payload::{InboundShare, ShareFilter, SharePayload};
use crate::store::ShareEventStore;

/// What happened to an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Not a text share; nothing changed
    Ignored,
    /// Stored for a later pull or attach; no consumer received it
    Stored,
    /// Stored and pushed to the attached consumer
    Pushed,
}

/// Delivery counters for observability
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub accepted: u64,
    pub ignored: u64,
    pub pushed: u64,
    pub dropped_pushes: u64,
    pub replays: u64,
}

struct BridgeState {
    store: ShareEventStore,
    consumer: Option<Box<dyn ShareConsumer>>,
    stats: BridgeStats,
}

impl BridgeState {
    /// Push the pending payload to the attached consumer, if both exist
    fn push_pending(&mut self, event_name: &str) -> bool {
        let (Some(payload), Some(consumer)) = (self.store.get(), self.consumer.as_ref()) else {
            return false;
        };

        if !consumer.is_active() {
            debug!("ShareBridge: consumer inactive, push dropped");
            self.stats.dropped_pushes += 1;
            return false;
        }

        consumer.notify(&ShareNotification {
            event: event_name.to_string(),
            text: payload.text().to_string(),
        });
        self.stats.pushed += 1;
        true
    }
}

/// Holds the pending share and the attached consumer
///
/// Construct one per process and share it by `Arc` between whatever receives
/// host events and whatever adapts the consumer runtime. Every operation runs
/// under a single lock, so checking attachment, touching the store and pushing
/// are one atomic step.
pub struct ShareBridge {
    filter: ShareFilter,
    event_name: String,
    state: Mutex<BridgeState>,
}

impl Default for ShareBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareBridge {
    /// Bridge accepting `SEND` + `text/plain` and pushing `onShareText`
    pub fn new() -> Self {
        Self::with_config(ShareFilter::default(), crate::SHARE_TEXT_EVENT)
    }

    pub fn with_config(filter: ShareFilter, event_name: impl Into<String>) -> Self {
        let event_name = event_name.into();
        debug!(?filter, %event_name, "ShareBridge::with_config: called");
        Self {
            filter,
            event_name,
            state: Mutex::new(BridgeState {
                store: ShareEventStore::new(),
                consumer: None,
                stats: BridgeStats::default(),
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_config(
            ShareFilter {
                send_action: config.send_action.clone(),
                mime_type: config.mime_type.clone(),
            },
            config.event_name.clone(),
        )
    }

    /// Handle an event from the host
    ///
    /// Events that are not text shares are the common case and are dropped
    /// silently. Accepted shares replace whatever was pending and are pushed
    /// to an attached consumer. The store keeps the payload either way.
    pub fn on_incoming_share(&self, event: &InboundShare) -> ShareOutcome {
        debug!(action = %event.action, "ShareBridge::on_incoming_share: called");
        let mut state = self.state.lock();

        let Some(payload) = SharePayload::from_event(event, &self.filter) else {
            state.stats.ignored += 1;
            return ShareOutcome::Ignored;
        };

        state.stats.accepted += 1;
        if let Some(displaced) = state.store.set(payload) {
            info!(
                discarded_len = displaced.text().len(),
                "ShareBridge: pending share replaced before it was cleared"
            );
        }

        if state.push_pending(&self.event_name) {
            ShareOutcome::Pushed
        } else {
            ShareOutcome::Stored
        }
    }

    /// Register the consumer, replacing any previous one
    ///
    /// A payload that is already pending is pushed to the new consumer right
    /// away. Returns whether that replay happened.
    pub fn attach(&self, consumer: impl ShareConsumer + 'static) -> bool {
        debug!("ShareBridge::attach: called");
        let mut state = self.state.lock();

        if state.consumer.replace(Box::new(consumer)).is_some() {
            debug!("ShareBridge::attach: replaced previous consumer");
        }

        let replayed = state.push_pending(&self.event_name);
        if replayed {
            state.stats.replays += 1;
            info!("ShareBridge: replayed pending share on attach");
        }
        replayed
    }

    /// Drop the consumer; the pending payload stays
    pub fn detach(&self) {
        debug!("ShareBridge::detach: called");
        self.state.lock().consumer = None;
    }

    pub fn is_attached(&self) -> bool {
        self.state.lock().consumer.is_some()
    }

    /// Current pending payload, without consuming it
    pub fn pull(&self) -> Option<SharePayload> {
        debug!("ShareBridge::pull: called");
        self.state.lock().store.get().cloned()
    }

    /// Forget the pending payload so it is not delivered again
    pub fn clear(&self) {
        debug!("ShareBridge::clear: called");
        self.state.lock().store.clear();
    }

    /// Pending text, as exposed to the consumer runtime
    pub fn get_pending(&self) -> Option<String> {
        self.pull().map(SharePayload::into_text)
    }

    pub fn clear_pending(&self) {
        self.clear();
    }

    pub fn stats(&self) -> BridgeStats {
        self.state.lock().stats.clone()
    }
}
