//! # Change Notifications
//!
//! Every successful mutation publishes an [`InventoryChange`] on a broadcast
//! channel. Read views subscribe and re-query when something they show
//! changed.
//!
//! ## Signal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  repo.create / update / delete / delete_all                             │
//! │       │  (only after the statement succeeded and touched rows)          │
//! │       ▼                                                                 │
//! │  ChangeNotifier::notify ──► broadcast::Sender<InventoryChange>          │
//! │                                  │            │                         │
//! │                                  ▼            ▼                         │
//! │                          LiveQuery(list)  LiveQuery(inventory/7)        │
//! │                           re-queries        re-queries if affected      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use inventory_core::ItemUri;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

/// Capacity of the change channel. Slow receivers past this lag and resync.
const CHANNEL_CAPACITY: usize = 64;

/// What kind of mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    /// Bulk delete of the whole collection.
    Cleared,
}

/// A committed change to the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryChange {
    pub kind: ChangeKind,
    /// Address of the touched record, or the collection for `Cleared`.
    pub uri: ItemUri,
    pub at: DateTime<Utc>,
}

impl InventoryChange {
    /// Creates a change stamped with the current time.
    pub fn new(kind: ChangeKind, uri: ItemUri) -> Self {
        InventoryChange {
            kind,
            uri,
            at: Utc::now(),
        }
    }
}

/// Sending half of the change channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<InventoryChange>,
}

impl ChangeNotifier {
    /// Creates a notifier with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    /// Publishes a change. Having no subscribers is fine.
    pub fn notify(&self, kind: ChangeKind, uri: ItemUri) {
        let receivers = self.tx.send(InventoryChange::new(kind, uri)).unwrap_or(0);
        trace!(?kind, uri = %uri, receivers, "Change published");
    }

    /// Subscribes to changes published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryChange> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
