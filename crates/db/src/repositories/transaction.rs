//! Transaction repository for ledger transaction collection operations.

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{self, doc};
use tracing::debug;

use crate::documents::TransactionDoc;
use crate::error::StoreError;

/// Repository over the `transactions` collection.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    collection: Collection<TransactionDoc>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(collection: Collection<TransactionDoc>) -> Self {
        Self { collection }
    }

    /// Counts transactions that are not soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_active(&self) -> Result<u64, StoreError> {
        let count = self
            .collection
            .count_documents(doc! { "is_deleted": false })
            .await?;
        Ok(count)
    }

    /// Lists every transaction that is not soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a document does not decode.
    pub async fn list_active(&self) -> Result<Vec<TransactionDoc>, StoreError> {
        let transactions = self
            .collection
            .find(doc! { "is_deleted": false })
            .await?
            .try_collect()
            .await?;
        Ok(transactions)
    }

    /// Soft-deletes every active transaction, stamping the tombstones with
    /// the given actor. Returns how many active transactions were found.
    ///
    /// The count is taken before the update so callers learn the size of
    /// what was cleared even when it was already zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the count or the update fails.
    pub async fn soft_delete_all(&self, actor: &str) -> Result<u64, StoreError> {
        let found = self.count_active().await?;
        if found > 0 {
            self.collection
                .update_many(
                    doc! { "is_deleted": false },
                    doc! { "$set": {
                        "is_deleted": true,
                        "deleted_at": bson::DateTime::now(),
                        "deleted_by": actor,
                    } },
                )
                .await?;
        }
        debug!(found, actor, "soft-deleted active transactions");
        Ok(found)
    }

    /// Lists the soft-deleted invoice-payment transactions stamped by the
    /// given actor. These tombstones are the evidence a rebuild works from.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a document does not decode.
    pub async fn find_payment_tombstones(
        &self,
        actor: &str,
    ) -> Result<Vec<TransactionDoc>, StoreError> {
        let tombstones = self
            .collection
            .find(doc! {
                "is_deleted": true,
                "reference_type": "invoice",
                "deleted_by": actor,
            })
            .await?
            .try_collect()
            .await?;
        Ok(tombstones)
    }

    /// Inserts a new transaction document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn insert(&self, transaction: &TransactionDoc) -> Result<(), StoreError> {
        self.collection.insert_one(transaction).await?;
        debug!(
            number = %transaction.transaction_number,
            kind = %transaction.transaction_type,
            "inserted transaction"
        );
        Ok(())
    }
}
