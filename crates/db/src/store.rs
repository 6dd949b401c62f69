//! Connection handle for the shop's document store.

use mongodb::bson::Document;
use mongodb::{Client, Collection, Database};
use tracing::info;

use aurum_shared::StoreConfig;

use crate::error::StoreError;
use crate::repositories::{AccountRepository, InvoiceRepository, TransactionRepository};

/// Collection holding the chart of accounts.
pub const ACCOUNTS_COLLECTION: &str = "accounts";
/// Collection holding ledger transactions.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";
/// Collection holding sales invoices.
pub const INVOICES_COLLECTION: &str = "invoices";

/// Handle to the ledger database; cheap to clone, repositories are
/// created on demand.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    db: Database,
}

impl LedgerStore {
    /// Connects to the document store named by the configuration.
    ///
    /// The driver connects lazily, so this succeeds even when the server
    /// is unreachable; the first query surfaces the failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection URL does not parse.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.url).await?;
        let db = client.database(&config.database);
        info!(database = %config.database, "connected to document store");
        Ok(Self { db })
    }

    /// Repository over the chart of accounts.
    #[must_use]
    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.db.collection(ACCOUNTS_COLLECTION))
    }

    /// Repository over ledger transactions.
    #[must_use]
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.db.collection(TRANSACTIONS_COLLECTION))
    }

    /// Repository over sales invoices.
    #[must_use]
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.db.collection(INVOICES_COLLECTION))
    }

    /// Untyped view of an arbitrary collection, used by the snapshot
    /// layer which copies documents without interpreting them.
    #[must_use]
    pub fn raw_collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}
