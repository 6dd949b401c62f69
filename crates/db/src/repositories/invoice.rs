//! Invoice repository for sales invoice collection operations.
//!
//! Invoices are never written by the reconciliation; this repository only
//! reads what the point-of-sale app recorded.

use mongodb::Collection;
use mongodb::bson::doc;

use crate::documents::InvoiceDoc;
use crate::error::StoreError;

/// Repository over the `invoices` collection.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    collection: Collection<InvoiceDoc>,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(collection: Collection<InvoiceDoc>) -> Self {
        Self { collection }
    }

    /// Finds an active invoice by its application-level id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_by_id(&self, id: &str) -> Result<Option<InvoiceDoc>, StoreError> {
        let invoice = self
            .collection
            .find_one(doc! { "id": id, "is_deleted": false })
            .await?;
        Ok(invoice)
    }

    /// Counts invoices that are not soft-deleted.
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

    /// Counts active invoices that have received any payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_with_payments(&self) -> Result<u64, StoreError> {
        let count = self
            .collection
            .count_documents(doc! { "is_deleted": false, "paid_amount": { "$gt": 0 } })
            .await?;
        Ok(count)
    }
}
