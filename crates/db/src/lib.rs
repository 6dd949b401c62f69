//! Document store layer for the accounting collections.
//!
//! This crate provides:
//! - Serde document models for accounts, transactions, and invoices
//! - Repository abstractions over the MongoDB collections
//! - Snapshot capture and restore of the accounting collections

pub mod documents;
pub mod error;
pub mod repositories;
pub mod snapshot;
pub mod store;

pub use documents::{AccountDoc, InvoiceDoc, SYSTEM_ACTOR, TransactionDoc};
pub use error::StoreError;
pub use repositories::{AccountRepository, InvoiceRepository, TransactionRepository};
pub use snapshot::{
    RestoreError, RestoreSummary, SnapshotArtifact, SnapshotError, SnapshotReceipt,
    restore_snapshot, write_snapshot,
};
pub use store::LedgerStore;
