//! Scripted host simulation
//!
//! A replay script is JSON lines, one step per line:
//!
//! ```text
//! # comment
//! {"op": "share", "action": "android.intent.action.SEND", "type": "text/plain", "text": "hi"}
//! {"op": "attach"}
//! {"op": "pull"}
//! {"op": "clear"}
//! {"op": "detach"}
//! ```

use std::path::Path;

use eyre::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::bridge::{ShareBridge, ShareOutcome};
use crate::consumer::ShareConsumer;
use crate::payload::InboundShare;

/// One line of a replay script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Host delivers an event
    Share(InboundShare),
    /// Consumer runtime comes up
    Attach,
    /// Consumer runtime goes away
    Detach,
    /// Consumer asks for the pending share
    Pull,
    /// Consumer acknowledges the pending share
    Clear,
}

/// Result of running one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Shared(ShareOutcome),
    Attached { replayed: bool },
    Detached,
    Pulled(Option<String>),
    Cleared,
}

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub results: Vec<StepResult>,
}

impl ReplayReport {
    /// Number of steps that pushed a notification (on share or on attach)
    pub fn push_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    StepResult::Shared(ShareOutcome::Pushed) | StepResult::Attached { replayed: true }
                )
            })
            .count()
    }
}

/// Parse a script from text
pub fn parse_script(content: &str) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: ReplayStep = serde_json::from_str(line).context(format!("Invalid replay step on line {}", idx + 1))?;
        steps.push(step);
    }
    debug!(count = steps.len(), "parse_script: parsed steps");
    Ok(steps)
}

/// Load a script from a file
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ReplayStep>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).context(format!("Failed to read replay script: {}", path.display()))?;
    parse_script(&content)
}

/// Drive `bridge` through `steps`, building a fresh consumer for each attach
pub fn run_script<C, F>(bridge: &ShareBridge, steps: &[ReplayStep], mut make_consumer: F) -> ReplayReport
where
    C: ShareConsumer + 'static,
    F: FnMut() -> C,
{
    let mut report = ReplayReport::default();
    for step in steps {
        debug!(?step, "run_script: step");
        let result = match step {
            ReplayStep::Share(event) => StepResult::Shared(bridge.on_incoming_share(event)),
            ReplayStep::Attach => StepResult::Attached {
                replayed: bridge.attach(make_consumer()),
            },
            ReplayStep::Detach => {
                bridge.detach();
                StepResult::Detached
            }
            ReplayStep::Pull => StepResult::Pulled(bridge.get_pending()),
            ReplayStep::Clear => {
                bridge.clear_pending();
                StepResult::Cleared
            }
        };
        report.results.push(result);
    }
    report
}
