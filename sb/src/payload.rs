//! Inbound share events and the validated payload extracted from them

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw share event as delivered by the host
///
/// Only these three fields are read. Everything else about the platform event
/// (launch flags, component, extras other than the text) is the host's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundShare {
    /// Platform action, e.g. `android.intent.action.SEND`
    pub action: String,

    /// Declared MIME type of the shared content
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,

    /// Text extra carried by the event
    #[serde(default)]
    pub text: Option<String>,
}

impl InboundShare {
    /// Build an event from its three parts
    pub fn new(action: impl Into<String>, content_type: Option<&str>, text: Option<&str>) -> Self {
        Self {
            action: action.into(),
            content_type: content_type.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    /// A well-formed `SEND` + `text/plain` event carrying `text`
    pub fn send_text(text: impl Into<String>) -> Self {
        Self {
            action: crate::SEND_ACTION.to_string(),
            content_type: Some(crate::TEXT_PLAIN.to_string()),
            text: Some(text.into()),
        }
    }
}

/// Which events count as a text share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFilter {
    /// Action the event must carry
    pub send_action: String,
    /// Content type the event must declare, compared exactly
    pub mime_type: String,
}

impl Default for ShareFilter {
    fn default() -> Self {
        Self {
            send_action: crate::SEND_ACTION.to_string(),
            mime_type: crate::TEXT_PLAIN.to_string(),
        }
    }
}

impl ShareFilter {
    /// True when action and declared type both match
    pub fn matches(&self, event: &InboundShare) -> bool {
        event.action == self.send_action && event.content_type.as_deref() == Some(self.mime_type.as_str())
    }
}

/// Text content of an accepted share
///
/// Never blank. The text is stored exactly as shared; trimming only decides
/// whether there is anything there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SharePayload {
    text: String,
}

impl SharePayload {
    /// Wrap `text`, or `None` if it is empty or whitespace only
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    /// Extract a payload from a raw event, failing closed
    pub fn from_event(event: &InboundShare, filter: &ShareFilter) -> Option<Self> {
        if !filter.matches(event) {
            debug!(action = %event.action, content_type = ?event.content_type, "SharePayload::from_event: not a text share");
            return None;
        }

        let payload = event.text.as_deref().and_then(Self::new);
        if payload.is_none() {
            debug!("SharePayload::from_event: missing or blank text");
        }
        payload
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
