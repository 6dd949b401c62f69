//! Destructive rebuild stage: tombstone, reset, reconstruct.
//!
//! Runs as a strict three-phase sequence. Every active transaction is
//! tombstoned first, balances drop back to opening values second, and
//! only then are fresh debit/credit pairs rebuilt from the payment
//! evidence left in the tombstones. No phase starts before the previous
//! one has fully committed.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use aurum_core::balance::{EntryType, balance_delta};
use aurum_core::numbering::{self, NumberPair};
use aurum_core::taxonomy::AccountType;
use aurum_db::documents::{AccountDoc, InvoiceDoc, SYSTEM_ACTOR, TransactionDoc};
use aurum_db::error::StoreError;
use aurum_db::repositories::AccountRepository;
use aurum_db::store::LedgerStore;

/// Actor stamped on tombstones, then matched to find payment evidence.
/// Changing it orphans the tombstones of every earlier run.
pub const REBUILD_ACTOR: &str = "COMPREHENSIVE_ACCOUNTING_FIX";

/// Category written on the asset-side leg of a rebuilt pair.
pub const DEBIT_CATEGORY: &str = "Invoice Payment - Cash/Bank (Debit)";
/// Category written on the revenue-side leg of a rebuilt pair.
pub const CREDIT_CATEGORY: &str = "Invoice Payment - Sales Income (Credit)";

/// Payment mode assumed when a seed carries none.
const DEFAULT_MODE: &str = "Cash";

/// Counters from a full rebuild pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildOutcome {
    /// Active transactions tombstoned at the start.
    pub transactions_deleted: u64,
    /// Account balances reset to opening values.
    pub balances_reset: u64,
    /// New transactions created, two per processed payment.
    pub transactions_created: u64,
    /// Seed payment records processed.
    pub payments_processed: u64,
}

/// Runs the full rebuild: tombstone everything, reset balances, then
/// reconstruct pairs from the payment tombstones.
///
/// # Errors
///
/// Returns an error on any store failure; the store is then left between
/// phases and recovery is via the pre-run snapshot.
pub async fn run(store: &LedgerStore) -> Result<RebuildOutcome, StoreError> {
    let transactions_deleted = store.transactions().soft_delete_all(REBUILD_ACTOR).await?;
    info!(count = transactions_deleted, "active transactions tombstoned");

    let balances_reset = reset_balances(store).await?;

    let (transactions_created, payments_processed) = reconstruct(store).await?;

    Ok(RebuildOutcome {
        transactions_deleted,
        balances_reset,
        transactions_created,
        payments_processed,
    })
}

/// Puts every active account back at its opening balance.
async fn reset_balances(store: &LedgerStore) -> Result<u64, StoreError> {
    let accounts = store.accounts();
    let active = accounts.list_active().await?;

    for account in &active {
        accounts
            .reset_balance(&account.id, account.opening_balance)
            .await?;
    }

    info!(count = active.len(), "account balances reset to opening values");
    Ok(u64::try_from(active.len()).unwrap_or(u64::MAX))
}

/// Rebuilds debit/credit pairs from payment tombstones, invoice by
/// invoice. Returns (transactions created, payment seeds processed).
async fn reconstruct(store: &LedgerStore) -> Result<(u64, u64), StoreError> {
    let accounts = store.accounts();
    let transactions = store.transactions();
    let invoices = store.invoices();

    let paying_invoices = invoices.count_with_payments().await?;
    info!(count = paying_invoices, "invoices with recorded payments");

    let tombstones = transactions.find_payment_tombstones(REBUILD_ACTOR).await?;
    info!(count = tombstones.len(), "payment tombstones found");
    let groups = group_by_invoice(tombstones);

    let cash = ensure_cash_account(&accounts).await?;
    let revenue = ensure_revenue_account(&accounts).await?;

    let mut transactions_created = 0u64;
    let mut payments_processed = 0u64;

    for group in groups {
        let Some(invoice) = invoices.find_active_by_id(&group.invoice_id).await? else {
            debug!(invoice_id = %group.invoice_id, "referenced invoice missing, group skipped");
            continue;
        };

        for seed in &group.seeds {
            if !is_payment_seed(seed) {
                continue;
            }

            // The account the payment originally landed in; a dangling
            // reference falls back to Cash.
            let seed_account_id = seed.account_id.as_deref().filter(|id| !id.is_empty());
            let payment_account = match seed_account_id {
                Some(id) => accounts
                    .find_active_by_id(id)
                    .await?
                    .unwrap_or_else(|| cash.clone()),
                None => cash.clone(),
            };

            let event_at = seed.created_at.map_or_else(Utc::now, |at| at.to_chrono());
            let live_count = transactions.count_active().await?;
            let numbers = numbering::pair_after(event_at.year(), live_count);

            let pair = plan_pair(seed, &invoice, &payment_account, &revenue, &numbers, event_at);

            transactions.insert(&pair.debit).await?;
            accounts
                .increment_balance(&payment_account.id, pair.debit_delta)
                .await?;
            transactions_created += 1;

            transactions.insert(&pair.credit).await?;
            accounts
                .increment_balance(&revenue.id, pair.credit_delta)
                .await?;
            transactions_created += 1;
            payments_processed += 1;
        }
    }

    info!(
        transactions_created,
        payments_processed, "reconstruction complete"
    );
    Ok((transactions_created, payments_processed))
}

/// Finds the active "Cash" account, creating a standard one if absent.
async fn ensure_cash_account(accounts: &AccountRepository) -> Result<AccountDoc, StoreError> {
    if let Some(account) = accounts.find_active_by_name("Cash").await? {
        return Ok(account);
    }
    let account = AccountDoc::standard("Cash", AccountType::Asset);
    accounts.insert(&account).await?;
    info!("created standard 'Cash' account");
    Ok(account)
}

/// Finds the active revenue account ("Sales Income" or "Sales"), creating
/// a standard "Sales Income" if neither exists.
async fn ensure_revenue_account(accounts: &AccountRepository) -> Result<AccountDoc, StoreError> {
    if let Some(account) = accounts
        .find_active_by_names(&["Sales Income", "Sales"])
        .await?
    {
        return Ok(account);
    }
    let account = AccountDoc::standard("Sales Income", AccountType::Income);
    accounts.insert(&account).await?;
    info!("created standard 'Sales Income' account");
    Ok(account)
}

// ============================================================================
// Pure reconstruction planning, kept free of the store for testing
// ============================================================================

/// Payment tombstones grouped under the invoice they reference.
#[derive(Debug, Clone)]
pub struct InvoiceGroup {
    /// Invoice id the seeds reference.
    pub invoice_id: String,
    /// Tombstones referencing the invoice, in store order.
    pub seeds: Vec<TransactionDoc>,
}

/// Groups payment tombstones by referenced invoice, preserving first-seen
/// invoice order. Tombstones without a reference id are dropped.
#[must_use]
pub fn group_by_invoice(tombstones: Vec<TransactionDoc>) -> Vec<InvoiceGroup> {
    let mut groups: Vec<InvoiceGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tombstone in tombstones {
        let Some(invoice_id) = tombstone.reference_id.clone().filter(|id| !id.is_empty()) else {
            continue;
        };
        match index.get(&invoice_id) {
            Some(&at) => groups[at].seeds.push(tombstone),
            None => {
                index.insert(invoice_id.clone(), groups.len());
                groups.push(InvoiceGroup {
                    invoice_id,
                    seeds: vec![tombstone],
                });
            }
        }
    }

    groups
}

/// Whether a historical category label marks the revenue leg of an old
/// pair.
#[must_use]
pub fn is_revenue_leg(category: &str) -> bool {
    category.contains("Income")
}

/// Whether a tombstone seeds a new pair: a positive amount and not the
/// revenue leg of the old pair, which gets regenerated rather than
/// replayed.
#[must_use]
pub fn is_payment_seed(seed: &TransactionDoc) -> bool {
    !is_revenue_leg(&seed.category) && seed.amount > Decimal::ZERO
}

/// A fully planned debit/credit pair, ready for insertion.
#[derive(Debug, Clone)]
pub struct PlannedPair {
    /// Asset-side leg.
    pub debit: TransactionDoc,
    /// Revenue-side leg.
    pub credit: TransactionDoc,
    /// Signed effect of the debit leg on the payment account.
    pub debit_delta: Decimal,
    /// Signed effect of the credit leg on the revenue account.
    pub credit_delta: Decimal,
}

/// Plans both legs of a rebuilt pair from one payment seed.
///
/// Mode, creator, and event time carry over from the seed with safe
/// defaults; the counterparty comes from the invoice. Account types
/// missing their canonical form fall back to the type the ensured
/// standard account would have.
#[must_use]
pub fn plan_pair(
    seed: &TransactionDoc,
    invoice: &InvoiceDoc,
    payment_account: &AccountDoc,
    revenue_account: &AccountDoc,
    numbers: &NumberPair,
    event_at: DateTime<Utc>,
) -> PlannedPair {
    let amount = seed.amount;
    let mode = seed
        .mode
        .clone()
        .unwrap_or_else(|| DEFAULT_MODE.to_string());
    let created_by = seed
        .created_by
        .clone()
        .unwrap_or_else(|| SYSTEM_ACTOR.to_string());
    let stamp = bson::DateTime::from_chrono(event_at);
    let party_id = invoice.customer_id.clone();
    let party_name = invoice.party_name().map(str::to_string);
    let invoice_number = invoice.number_for_notes();

    let debit = TransactionDoc {
        object_id: None,
        id: Uuid::new_v4().to_string(),
        transaction_number: numbers.debit.clone(),
        date: Some(stamp),
        transaction_type: EntryType::Debit.as_str().to_string(),
        mode: Some(mode.clone()),
        account_id: Some(payment_account.id.clone()),
        account_name: Some(payment_account.name.clone()),
        party_id: party_id.clone(),
        party_name: party_name.clone(),
        amount,
        category: DEBIT_CATEGORY.to_string(),
        notes: Some(format!("Payment for invoice {invoice_number}")),
        reference_type: Some("invoice".to_string()),
        reference_id: Some(invoice.id.clone()),
        created_by: Some(created_by.clone()),
        created_at: Some(stamp),
        is_deleted: false,
        deleted_at: None,
        deleted_by: None,
    };

    let credit = TransactionDoc {
        object_id: None,
        id: Uuid::new_v4().to_string(),
        transaction_number: numbers.credit.clone(),
        date: Some(stamp),
        transaction_type: EntryType::Credit.as_str().to_string(),
        mode: Some(mode),
        account_id: Some(revenue_account.id.clone()),
        account_name: Some(revenue_account.name.clone()),
        party_id,
        party_name,
        amount,
        category: CREDIT_CATEGORY.to_string(),
        notes: Some(format!("Revenue for invoice {invoice_number}")),
        reference_type: Some("invoice".to_string()),
        reference_id: Some(invoice.id.clone()),
        created_by: Some(created_by),
        created_at: Some(stamp),
        is_deleted: false,
        deleted_at: None,
        deleted_by: None,
    };

    let debit_delta = balance_delta(
        payment_account.account_type().unwrap_or(AccountType::Asset),
        EntryType::Debit,
        amount,
    );
    let credit_delta = balance_delta(
        revenue_account.account_type().unwrap_or(AccountType::Income),
        EntryType::Credit,
        amount,
    );

    PlannedPair {
        debit,
        credit,
        debit_delta,
        credit_delta,
    }
}

#[cfg(test)]
#[path = "rebuild_tests.rs"]
mod tests;
