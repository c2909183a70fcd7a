//! # Live Views
//!
//! A [`LiveQuery`] holds the current result of reading one address and
//! refreshes it whenever a relevant change is published.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  broadcast::Receiver<InventoryChange>                                   │
//! │       │                                                                 │
//! │       ├── change.uri does not affect target → ignored                   │
//! │       ├── Lagged → re-query (changes were missed)                       │
//! │       ▼                                                                 │
//! │  repo.fetch(target)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::Sender<Vec<InventoryItem>> ──► LiveQuery::snapshot / changed    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping the `LiveQuery` stops its refresh task.

use inventory_core::{InventoryItem, ItemUri};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// Self-refreshing read of one address.
#[derive(Debug)]
pub struct LiveQuery {
    target: ItemUri,
    rx: watch::Receiver<Vec<InventoryItem>>,
    handle: JoinHandle<()>,
}

impl LiveQuery {
    /// Loads the first snapshot and starts the refresh task.
    ///
    /// Subscribes before the first read so no change between the read and
    /// the task start is lost.
    pub(crate) async fn spawn(db: Database, target: ItemUri) -> DbResult<Self> {
        let mut changes = db.subscribe();
        let repo = db.inventory();

        let initial = repo.fetch(target).await?;
        debug!(uri = %target, rows = initial.len(), "Live view started");

        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) if target.is_affected_by(&change.uri) => {}
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(uri = %target, skipped, "Live view lagged, resyncing");
                    }
                    Err(RecvError::Closed) => break,
                }

                match repo.fetch(target).await {
                    Ok(items) => {
                        if tx.send(items).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(uri = %target, error = %err, "Live view refresh failed"),
                }
            }

            debug!(uri = %target, "Live view stopped");
        });

        Ok(LiveQuery { target, rx, handle })
    }

    /// Address this view reads.
    pub fn target(&self) -> ItemUri {
        self.target
    }

    /// Current rows.
    pub fn snapshot(&self) -> Vec<InventoryItem> {
        self.rx.borrow().clone()
    }

    /// Waits for the next refresh and returns the new rows.
    pub async fn changed(&mut self) -> DbResult<Vec<InventoryItem>> {
        self.rx
            .changed()
            .await
            .map_err(|_| DbError::Internal("live view stopped".to_string()))?;

        Ok(self.rx.borrow_and_update().clone())
    }
}

impl Drop for LiveQuery {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
