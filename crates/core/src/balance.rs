//! Signed balance deltas for debit and credit entries.
//!
//! In double-entry bookkeeping:
//! - Asset/Expense accounts are debit-normal: debits increase them
//! - Income/Liability/Equity accounts are credit-normal: credits increase them

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::taxonomy::AccountType;

/// Entry type: either Debit or Credit.
///
/// Every complete economic event books one of each, for equal amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntryType {
    /// The lowercase string stored in transaction documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Parses a stored transaction type string.
    ///
    /// Exact match only; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }

    /// The other leg of a pair.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which entry type increases an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBalance {
    /// Debits increase the balance (asset, expense).
    Debit,
    /// Credits increase the balance (income, liability, equity).
    Credit,
}

impl AccountType {
    /// The normal balance side for this account type.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Income | Self::Liability | Self::Equity => NormalBalance::Credit,
        }
    }
}

/// Signed change to an account's running balance for one entry.
///
/// An entry on the account's normal side adds the amount; an entry on the
/// other side subtracts it. The magnitude is always the entry amount.
#[must_use]
pub fn balance_delta(account_type: AccountType, entry_type: EntryType, amount: Decimal) -> Decimal {
    match (account_type.normal_balance(), entry_type) {
        (NormalBalance::Debit, EntryType::Debit) | (NormalBalance::Credit, EntryType::Credit) => {
            amount
        }
        (NormalBalance::Debit, EntryType::Credit) | (NormalBalance::Credit, EntryType::Debit) => {
            -amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(AccountType::Asset, EntryType::Debit, dec!(100), dec!(100))]
    #[case(AccountType::Asset, EntryType::Credit, dec!(100), dec!(-100))]
    #[case(AccountType::Expense, EntryType::Debit, dec!(100), dec!(100))]
    #[case(AccountType::Expense, EntryType::Credit, dec!(100), dec!(-100))]
    #[case(AccountType::Income, EntryType::Debit, dec!(100), dec!(-100))]
    #[case(AccountType::Income, EntryType::Credit, dec!(100), dec!(100))]
    #[case(AccountType::Liability, EntryType::Debit, dec!(100), dec!(-100))]
    #[case(AccountType::Liability, EntryType::Credit, dec!(100), dec!(100))]
    #[case(AccountType::Equity, EntryType::Debit, dec!(100), dec!(-100))]
    #[case(AccountType::Equity, EntryType::Credit, dec!(100), dec!(100))]
    fn test_delta_sign_table(
        #[case] account_type: AccountType,
        #[case] entry_type: EntryType,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(balance_delta(account_type, entry_type, amount), expected);
    }

    #[test]
    fn test_normal_balance_sides() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Income.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_entry_type_parse_exact() {
        assert_eq!(EntryType::parse("debit"), Some(EntryType::Debit));
        assert_eq!(EntryType::parse("credit"), Some(EntryType::Credit));
        assert_eq!(EntryType::parse("Debit"), None);
        assert_eq!(EntryType::parse(""), None);
    }

    /// Strategy for amounts with two decimal places, like stored payments.
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn account_type_strategy() -> impl Strategy<Value = AccountType> {
        prop::sample::select(AccountType::ALL.to_vec())
    }

    fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
        prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// **Property: opposite entries cancel**
        ///
        /// *For any* account type and amount, a debit and a credit of the
        /// same amount sum to zero on the same account.
        #[test]
        fn prop_opposite_entries_cancel(
            account_type in account_type_strategy(),
            entry_type in entry_type_strategy(),
            amount in amount_strategy(),
        ) {
            let one_way = balance_delta(account_type, entry_type, amount);
            let other_way = balance_delta(account_type, entry_type.opposite(), amount);
            prop_assert_eq!(one_way + other_way, Decimal::ZERO);
        }

        /// **Property: delta magnitude equals the amount**
        #[test]
        fn prop_delta_magnitude(
            account_type in account_type_strategy(),
            entry_type in entry_type_strategy(),
            amount in amount_strategy(),
        ) {
            prop_assert_eq!(
                balance_delta(account_type, entry_type, amount).abs(),
                amount.abs()
            );
        }

        /// **Property: normal-side entries are non-negative**
        ///
        /// *For any* positive amount, an entry on the account's normal side
        /// increases the balance and an entry on the other side decreases it.
        #[test]
        fn prop_normal_side_increases(
            account_type in account_type_strategy(),
            amount in amount_strategy(),
        ) {
            let normal_entry = match account_type.normal_balance() {
                NormalBalance::Debit => EntryType::Debit,
                NormalBalance::Credit => EntryType::Credit,
            };
            prop_assert_eq!(balance_delta(account_type, normal_entry, amount), amount);
            prop_assert_eq!(
                balance_delta(account_type, normal_entry.opposite(), amount),
                -amount
            );
        }
    }
}
