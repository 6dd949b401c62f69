//! Trial balance and double-entry checks.
//!
//! Both checks accept drift of up to one currency unit between totals.
//! Years of the shop app writing floating-point amounts left sub-unit
//! noise in the stored data, and the checks have to certify a rebuild
//! over that data as it is.

use rust_decimal::Decimal;

use crate::balance::{EntryType, NormalBalance};
use crate::taxonomy::AccountType;

/// Largest tolerated absolute difference between two totals.
pub const BALANCE_TOLERANCE: Decimal = Decimal::ONE;

/// Returns true if two totals agree within [`BALANCE_TOLERANCE`].
///
/// The comparison is strict: a difference of exactly one unit fails.
#[must_use]
pub fn totals_agree(left: Decimal, right: Decimal) -> bool {
    (left - right).abs() < BALANCE_TOLERANCE
}

/// Outcome of the trial balance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBalanceCheck {
    /// Whether the two sides agree within tolerance.
    pub balanced: bool,
    /// Sum of balances on debit-normal accounts (asset, expense).
    pub debit_total: Decimal,
    /// Sum of balances on credit-normal accounts (income, liability, equity).
    pub credit_total: Decimal,
    /// Active accounts whose stored type is outside the canonical five.
    pub unknown_accounts: u64,
}

/// Runs the trial balance over active account balances.
///
/// Accounts with a non-canonical stored type (`None`) land in the unknown
/// count and contribute to neither side.
#[must_use]
pub fn trial_balance<I>(accounts: I) -> TrialBalanceCheck
where
    I: IntoIterator<Item = (Option<AccountType>, Decimal)>,
{
    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;
    let mut unknown_accounts = 0u64;

    for (account_type, balance) in accounts {
        match account_type.map(AccountType::normal_balance) {
            Some(NormalBalance::Debit) => debit_total += balance,
            Some(NormalBalance::Credit) => credit_total += balance,
            None => unknown_accounts += 1,
        }
    }

    TrialBalanceCheck {
        balanced: totals_agree(debit_total, credit_total),
        debit_total,
        credit_total,
        unknown_accounts,
    }
}

/// Outcome of the double-entry check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleEntryCheck {
    /// Whether debit and credit legs agree within tolerance.
    pub balanced: bool,
    /// Sum of active debit leg amounts.
    pub debit_total: Decimal,
    /// Sum of active credit leg amounts.
    pub credit_total: Decimal,
}

/// Runs the double-entry check over active transaction legs.
#[must_use]
pub fn double_entry<I>(entries: I) -> DoubleEntryCheck
where
    I: IntoIterator<Item = (EntryType, Decimal)>,
{
    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;

    for (entry_type, amount) in entries {
        match entry_type {
            EntryType::Debit => debit_total += amount,
            EntryType::Credit => credit_total += amount,
        }
    }

    DoubleEntryCheck {
        balanced: totals_agree(debit_total, credit_total),
        debit_total,
        credit_total,
    }
}
