//! Account repository for chart of accounts collection operations.

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use rust_decimal::Decimal;
use tracing::debug;

use aurum_core::taxonomy::AccountType;

use crate::documents::{AccountDoc, amount_to_bson};
use crate::error::StoreError;

/// Repository over the `accounts` collection.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    collection: Collection<AccountDoc>,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(collection: Collection<AccountDoc>) -> Self {
        Self { collection }
    }

    /// Lists every account that is not soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a document does not decode.
    pub async fn list_active(&self) -> Result<Vec<AccountDoc>, StoreError> {
        let accounts = self
            .collection
            .find(doc! { "is_deleted": false })
            .await?
            .try_collect()
            .await?;
        Ok(accounts)
    }

    /// Finds an active account by its application-level id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_by_id(&self, id: &str) -> Result<Option<AccountDoc>, StoreError> {
        let account = self
            .collection
            .find_one(doc! { "id": id, "is_deleted": false })
            .await?;
        Ok(account)
    }

    /// Finds an active account by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<AccountDoc>, StoreError> {
        let account = self
            .collection
            .find_one(doc! { "name": name, "is_deleted": false })
            .await?;
        Ok(account)
    }

    /// Finds an active account whose name is any of the given candidates,
    /// preferring whichever the store returns first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_by_names(
        &self,
        names: &[&str],
    ) -> Result<Option<AccountDoc>, StoreError> {
        let account = self
            .collection
            .find_one(doc! { "name": { "$in": names }, "is_deleted": false })
            .await?;
        Ok(account)
    }

    /// Inserts a new account document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn insert(&self, account: &AccountDoc) -> Result<(), StoreError> {
        self.collection.insert_one(account).await?;
        debug!(id = %account.id, name = %account.name, "inserted account");
        Ok(())
    }

    /// Overwrites the recorded type of a single account.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn set_account_type(
        &self,
        id: &str,
        account_type: AccountType,
    ) -> Result<(), StoreError> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "account_type": account_type.as_str() } },
            )
            .await?;
        Ok(())
    }

    /// Resets one account's running balance to its opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn reset_balance(&self, id: &str, opening_balance: Decimal) -> Result<(), StoreError> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "current_balance": amount_to_bson(opening_balance) } },
            )
            .await?;
        Ok(())
    }

    /// Applies a signed delta to one account's running balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn increment_balance(&self, id: &str, delta: Decimal) -> Result<(), StoreError> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$inc": { "current_balance": amount_to_bson(delta) } },
            )
            .await?;
        Ok(())
    }
}
