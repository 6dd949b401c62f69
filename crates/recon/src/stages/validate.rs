//! Validation stage: certifies the rebuilt ledger.
//!
//! Runs the trial balance over active account balances and the
//! double-entry check over active transaction legs. Both checks are
//! pure; this module only fetches their inputs and logs the verdicts.

use tracing::{info, warn};

use aurum_core::validation::{self, DoubleEntryCheck, TrialBalanceCheck};
use aurum_db::{LedgerStore, StoreError};

/// Runs the trial balance over every active account.
///
/// Accounts whose stored type is still outside the canonical five are
/// counted and excluded from both sides.
///
/// # Errors
///
/// Returns [`StoreError`] when the account listing fails.
pub async fn check_trial_balance(store: &LedgerStore) -> Result<TrialBalanceCheck, StoreError> {
    let accounts = store.accounts().list_active().await?;
    let check = validation::trial_balance(
        accounts
            .iter()
            .map(|account| (account.account_type(), account.current_balance)),
    );

    if check.unknown_accounts > 0 {
        warn!(
            unknown_accounts = check.unknown_accounts,
            "accounts with non-canonical types excluded from trial balance"
        );
    }
    if check.balanced {
        info!(
            debit_total = %check.debit_total,
            credit_total = %check.credit_total,
            "trial balance holds"
        );
    } else {
        warn!(
            debit_total = %check.debit_total,
            credit_total = %check.credit_total,
            "trial balance does not hold"
        );
    }

    Ok(check)
}

/// Runs the double-entry check over every active transaction.
///
/// Legs whose `transaction_type` is neither `debit` nor `credit` are
/// skipped; the rebuild only ever writes those two.
///
/// # Errors
///
/// Returns [`StoreError`] when the transaction listing fails.
pub async fn check_double_entry(store: &LedgerStore) -> Result<DoubleEntryCheck, StoreError> {
    let transactions = store.transactions().list_active().await?;
    let check = validation::double_entry(transactions.iter().filter_map(|transaction| {
        transaction
            .entry_type()
            .map(|entry_type| (entry_type, transaction.amount))
    }));

    if check.balanced {
        info!(
            debit_total = %check.debit_total,
            credit_total = %check.credit_total,
            "double entry holds"
        );
    } else {
        warn!(
            debit_total = %check.debit_total,
            credit_total = %check.credit_total,
            "double entry does not hold"
        );
    }

    Ok(check)
}
