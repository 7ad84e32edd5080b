//! ShareBridge - hand OS share-text events to a consumer runtime
//!
//! The host delivers a one-shot "share this text" event whenever it likes: before
//! the consumer runtime exists, while it is attached, or never. The bridge keeps
//! the most recent valid payload so it can be delivered three ways:
//!
//! - **Push on receipt:** an attached consumer is notified immediately
//! - **Push on attach:** a payload that arrived earlier is replayed on attach
//! - **Pull:** the consumer asks for the pending payload at its own initiative
//!
//! Delivery never consumes the payload. The consumer calls `clear` once it has
//! acted on it.
//!
//! # Example
//!
//! ```ignore
//! use sharebridge::{ChannelConsumer, InboundShare, ShareBridge};
//!
//! let bridge = ShareBridge::new();
//! bridge.on_incoming_share(&InboundShare::send_text("https://youtu.be/abc123?t=42"));
//!
//! let (consumer, mut rx) = ChannelConsumer::pair();
//! bridge.attach(consumer); // replays the pending share over rx
//! let link = sharebridge::timestamp::parse_shared_text(&rx.try_recv()?.text)?;
//! bridge.clear_pending();
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod consumer;
pub mod payload;
pub mod replay;
pub mod store;
pub mod timestamp;

pub use bridge::{BridgeStats, ShareBridge, ShareOutcome};
pub use consumer::{ChannelConsumer, ShareConsumer, ShareNotification};
pub use payload::{InboundShare, ShareFilter, SharePayload};
pub use store::ShareEventStore;

/// Platform action for "send this content to an app"
pub const SEND_ACTION: &str = "android.intent.action.SEND";

/// The only content type accepted as a text share
pub const TEXT_PLAIN: &str = "text/plain";

/// Name of the notification pushed to the consumer runtime
pub const SHARE_TEXT_EVENT: &str = "onShareText";
