//! Point-in-time snapshots of the accounting collections.
//!
//! A snapshot is one JSON artifact holding full copies of the accounting
//! collections. One is written before destructive work begins; the restore
//! binary replays it when an operator needs the pre-run state back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::store::LedgerStore;

/// Collections captured by a snapshot and replaced by a restore.
pub const SNAPSHOT_COLLECTIONS: [&str; 5] = [
    "accounts",
    "transactions",
    "invoices",
    "daily_closings",
    "gold_ledger",
];

/// Error types for snapshot capture.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading collection contents failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The artifact did not serialize.
    #[error("snapshot artifact did not serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the artifact file failed.
    #[error("snapshot artifact write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Error types for snapshot restore.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// The artifact path does not exist.
    #[error("snapshot artifact not found: {0}")]
    MissingArtifact(PathBuf),

    /// The artifact exists but does not parse as a snapshot.
    #[error("snapshot artifact did not parse: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Reading the artifact file failed.
    #[error("snapshot artifact read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Replacing collection contents failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The artifact on disk: a full copy of each captured collection.
///
/// Documents are carried as raw BSON, serialized to extended JSON inside
/// the artifact, so object ids and datetimes survive a round trip intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotArtifact {
    /// When the snapshot was taken.
    pub backup_timestamp: DateTime<Utc>,
    /// Document counts per collection at capture time.
    #[serde(default)]
    pub statistics: BTreeMap<String, u64>,
    /// Raw documents per collection.
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<Document>>,
}

impl SnapshotArtifact {
    /// Artifact file name for a snapshot taken at the given instant.
    #[must_use]
    pub fn file_name(timestamp: DateTime<Utc>) -> String {
        format!(
            "accounting_backup_{}.json",
            timestamp.format("%Y%m%d_%H%M%S")
        )
    }
}

/// Receipt handed back once a snapshot is safely on disk.
#[derive(Debug, Clone)]
pub struct SnapshotReceipt {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Document counts per collection at capture time.
    pub statistics: BTreeMap<String, u64>,
}

/// Per-collection outcome of a restore.
#[derive(Debug, Clone)]
pub struct RestoreSummary {
    /// Documents inserted per collection, in capture order. Collections
    /// absent from the artifact are left untouched and do not appear.
    pub restored: Vec<(String, u64)>,
    /// Statistics block carried in the artifact.
    pub statistics: BTreeMap<String, u64>,
    /// Capture time recorded in the artifact.
    pub backup_timestamp: DateTime<Utc>,
}

/// Captures every snapshot collection into a JSON artifact under `dir`,
/// creating the directory if needed.
///
/// # Errors
///
/// Returns an error if a collection cannot be read, the artifact does not
/// serialize, or the file write fails.
pub async fn write_snapshot(
    store: &LedgerStore,
    dir: &Path,
) -> Result<SnapshotReceipt, SnapshotError> {
    let timestamp = Utc::now();
    let mut statistics = BTreeMap::new();
    let mut collections = BTreeMap::new();

    for name in SNAPSHOT_COLLECTIONS {
        let documents: Vec<Document> = store
            .raw_collection(name)
            .find(doc! {})
            .await
            .map_err(StoreError::from)?
            .try_collect()
            .await
            .map_err(StoreError::from)?;
        statistics.insert(
            name.to_string(),
            u64::try_from(documents.len()).unwrap_or(u64::MAX),
        );
        collections.insert(name.to_string(), documents);
    }

    let artifact = SnapshotArtifact {
        backup_timestamp: timestamp,
        statistics: statistics.clone(),
        collections,
    };

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(SnapshotArtifact::file_name(timestamp));
    let bytes = serde_json::to_vec_pretty(&artifact)?;
    tokio::fs::write(&path, bytes).await?;
    info!(path = %path.display(), "snapshot artifact written");

    Ok(SnapshotReceipt { path, statistics })
}

/// Replaces collection contents wholesale from a snapshot artifact.
///
/// Each collection named in the artifact is cleared and refilled with the
/// captured documents. The path is checked before anything is touched, so
/// a bad invocation cannot clear live data.
///
/// # Errors
///
/// Returns an error if the path does not exist, the artifact does not
/// parse, or a collection write fails.
pub async fn restore_snapshot(
    store: &LedgerStore,
    path: &Path,
) -> Result<RestoreSummary, RestoreError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(RestoreError::MissingArtifact(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path).await?;
    let artifact: SnapshotArtifact = serde_json::from_slice(&bytes)?;

    let mut restored = Vec::with_capacity(SNAPSHOT_COLLECTIONS.len());
    for name in SNAPSHOT_COLLECTIONS {
        let Some(documents) = artifact.collections.get(name) else {
            continue;
        };
        let collection = store.raw_collection(name);
        collection
            .delete_many(doc! {})
            .await
            .map_err(StoreError::from)?;
        if !documents.is_empty() {
            collection
                .insert_many(documents)
                .await
                .map_err(StoreError::from)?;
        }
        restored.push((
            name.to_string(),
            u64::try_from(documents.len()).unwrap_or(u64::MAX),
        ));
        info!(collection = name, count = documents.len(), "collection restored");
    }

    Ok(RestoreSummary {
        restored,
        statistics: artifact.statistics,
        backup_timestamp: artifact.backup_timestamp,
    })
}
