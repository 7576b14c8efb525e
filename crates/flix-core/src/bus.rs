//! Same-context change notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::ContentId;

const BUS_CAPACITY: usize = 128;

/// The kind of mutation that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Added,
    Updated,
    Removed,
}

/// Published after every successful content store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotice {
    pub op: ChangeOp,
    pub id: ContentId,
    pub at: DateTime<Utc>,
}

impl ChangeNotice {
    pub fn now(op: ChangeOp, id: ContentId) -> Self {
        Self {
            op,
            id,
            at: Utc::now(),
        }
    }
}

/// In-process publish/subscribe channel for [`ChangeNotice`]s.
///
/// Cloning yields another handle to the same channel, so components that
/// share a bus see each other's notices. Independent of whatever the
/// persistence backend reports to other contexts.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<ChangeNotice>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publish a notice. Returns how many subscribers received it.
    pub fn publish(&self, notice: ChangeNotice) -> usize {
        self.tx.send(notice).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotice> {
        self.tx.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
