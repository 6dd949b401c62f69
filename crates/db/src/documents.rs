//! Document models for the shop's MongoDB collections.
//!
//! Fields mirror what the upstream app writes. Deserialization is tolerant:
//! years of schema drift mean almost any field can be missing from an old
//! document, and a rebuild has to read them all without falling over.
//! Amounts are [`Decimal`] in Rust and BSON doubles on the wire, matching
//! the documents already in the store.

use mongodb::bson::{self, Bson, oid::ObjectId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use aurum_core::balance::EntryType;
use aurum_core::taxonomy::AccountType;

/// Actor recorded on documents this tool creates on its own authority.
pub const SYSTEM_ACTOR: &str = "system";

/// Converts a decimal amount to the BSON double the upstream app stores.
#[must_use]
pub fn amount_to_bson(value: Decimal) -> Bson {
    // Decimal -> f64 never fails for ledger magnitudes; the fallback is
    // unreachable.
    Bson::Double(value.to_f64().unwrap_or_default())
}

/// Accepts a BSON datetime, treating a missing or differently-typed value
/// as absent instead of failing the whole document.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<bson::DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Bson>::deserialize(deserializer)?.and_then(|value| match value {
            Bson::DateTime(datetime) => Some(datetime),
            _ => None,
        }),
    )
}

/// One document in the `accounts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDoc {
    /// Mongo's own id; left to the server on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Application-level id; all queries use this, never `_id`.
    pub id: String,
    /// Free-text name, the classification input.
    #[serde(default)]
    pub name: String,
    /// Recorded type string. Canonical after classification has run,
    /// anything at all before.
    #[serde(default)]
    pub account_type: String,
    /// Balance at the start of bookkeeping.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    /// Running balance maintained in the store.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<bson::DateTime>,
    /// Creating actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
}

impl AccountDoc {
    /// Parses the recorded type, if it is one of the canonical five.
    #[must_use]
    pub fn account_type(&self) -> Option<AccountType> {
        AccountType::parse(&self.account_type)
    }

    /// A fresh standard account with zero balances, as the rebuild seeds
    /// them when the chart is missing one.
    #[must_use]
    pub fn standard(name: &str, account_type: AccountType) -> Self {
        Self {
            object_id: None,
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            account_type: account_type.as_str().to_string(),
            opening_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            created_at: Some(bson::DateTime::now()),
            created_by: Some(SYSTEM_ACTOR.to_string()),
            is_deleted: false,
        }
    }
}

/// One document in the `transactions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDoc {
    /// Mongo's own id; left to the server on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Application-level id.
    pub id: String,
    /// Sequential `TXN-<year>-<seq>` number.
    #[serde(default)]
    pub transaction_number: String,
    /// Ledger date of the underlying event.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<bson::DateTime>,
    /// "debit" or "credit" on documents this tool writes.
    #[serde(default)]
    pub transaction_type: String,
    /// Payment mode (Cash, Card, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Account this leg posts to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Denormalized account name at write time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Counterparty id, when the invoice names a registered customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
    /// Counterparty display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    /// Leg amount; strictly positive on documents this tool writes.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Category label; credit legs carry "Income" in theirs.
    #[serde(default)]
    pub category: String,
    /// Free-text notes naming the invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Kind of document this leg references ("invoice" for payments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    /// Id of the referenced document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Creating actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Creation time of the original event.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<bson::DateTime>,
    /// Soft-delete flag; tombstones keep the full document.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the tombstone was stamped.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<bson::DateTime>,
    /// Actor that stamped the tombstone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
}

impl TransactionDoc {
    /// Parses the stored transaction type, if it names a known leg.
    #[must_use]
    pub fn entry_type(&self) -> Option<EntryType> {
        EntryType::parse(&self.transaction_type)
    }
}

/// One document in the `invoices` collection. Read-only to this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDoc {
    /// Mongo's own id.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Application-level id, what transaction `reference_id` points at.
    pub id: String,
    /// Human-facing invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Registered customer id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Registered customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Walk-in counterparty name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk_in_name: Option<String>,
    /// Total paid against this invoice.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
}

impl InvoiceDoc {
    /// Counterparty display name: the registered customer, else the
    /// walk-in name. Empty strings count as missing.
    #[must_use]
    pub fn party_name(&self) -> Option<&str> {
        self.customer_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.walk_in_name.as_deref().filter(|name| !name.is_empty()))
    }

    /// Invoice number for display in notes.
    #[must_use]
    pub fn number_for_notes(&self) -> &str {
        self.invoice_number.as_deref().unwrap_or("N/A")
    }
}
