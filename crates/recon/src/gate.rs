//! Snapshot gate guarding the destructive stages.
//!
//! The reconciliation never touches live data until a point-in-time copy
//! is safely on disk. The gate trait is the seam: production wires in the
//! store-backed snapshot writer, tests substitute failing or recording
//! stand-ins.

use std::path::PathBuf;

use aurum_db::snapshot::{SnapshotError, SnapshotReceipt, write_snapshot};
use aurum_db::store::LedgerStore;

/// Pre-flight collaborator that must succeed before any destructive step.
#[async_trait::async_trait]
pub trait SnapshotGate: Send + Sync {
    /// Captures a point-in-time copy of the accounting collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy could not be taken; the caller must
    /// abort without mutating anything.
    async fn capture(&self) -> Result<SnapshotReceipt, SnapshotError>;
}

/// Production gate: snapshots the store into a JSON artifact directory.
#[derive(Debug, Clone)]
pub struct StoreSnapshotGate {
    store: LedgerStore,
    snapshots_dir: PathBuf,
}

impl StoreSnapshotGate {
    /// Creates a gate writing artifacts under `snapshots_dir`.
    #[must_use]
    pub const fn new(store: LedgerStore, snapshots_dir: PathBuf) -> Self {
        Self {
            store,
            snapshots_dir,
        }
    }
}

#[async_trait::async_trait]
impl SnapshotGate for StoreSnapshotGate {
    async fn capture(&self) -> Result<SnapshotReceipt, SnapshotError> {
        write_snapshot(&self.store, &self.snapshots_dir).await
    }
}
