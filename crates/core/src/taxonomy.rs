//! Canonical account types and name-based classification.
//!
//! Historical data carries free-text `account_type` strings that drifted
//! over the years of the shop app's life. Classification maps every account
//! back onto the five canonical types using an ordered name table.

use serde::{Deserialize, Serialize};

/// The five canonical account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources the shop owns (cash, bank, receivables).
    Asset,
    /// Revenue earned (sales, making charges, exchange income).
    Income,
    /// Costs incurred (rent, wages, bank charges).
    Expense,
    /// Obligations owed (taxes payable, customer advances).
    Liability,
    /// Owner's stake (capital, retained earnings).
    Equity,
}

impl AccountType {
    /// All canonical types, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Income,
        Self::Expense,
        Self::Liability,
        Self::Equity,
    ];

    /// The lowercase string stored in account documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Liability => "liability",
            Self::Equity => "equity",
        }
    }

    /// Parses a stored type string, case-insensitively.
    ///
    /// Returns `None` for anything outside the canonical five.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered name table driving classification.
///
/// Order is significant: the first entry whose name appears inside the
/// account's name wins. "Downtown Bank Branch" matches "Bank" and is an
/// asset; an account literally named "Bank Charges" also matches "Bank"
/// first and never reaches the expense entry. The table mirrors the chart
/// of accounts the shop app seeds.
pub const STANDARD_ACCOUNTS: [(&str, AccountType); 20] = [
    ("Cash", AccountType::Asset),
    ("Bank", AccountType::Asset),
    ("Petty Cash", AccountType::Asset),
    ("Sales", AccountType::Income),
    ("Sales Income", AccountType::Income),
    ("Gold Exchange", AccountType::Income),
    ("Gold Exchange Income", AccountType::Income),
    ("Making Charges Income", AccountType::Income),
    ("Stone Charges Income", AccountType::Income),
    ("Service Income", AccountType::Income),
    ("GST Payable", AccountType::Liability),
    ("VAT Payable", AccountType::Liability),
    ("Customer Advance", AccountType::Liability),
    ("Rent Expense", AccountType::Expense),
    ("Wages Expense", AccountType::Expense),
    ("Bank Charges", AccountType::Expense),
    ("Accounts Receivable", AccountType::Asset),
    ("Accounts Payable", AccountType::Liability),
    ("Capital", AccountType::Equity),
    ("Retained Earnings", AccountType::Equity),
];

/// Classifies an account by name against [`STANDARD_ACCOUNTS`].
///
/// The match is a case-insensitive substring test; the first table entry
/// found inside `name` wins. Returns `None` when no entry matches.
#[must_use]
pub fn classify(name: &str) -> Option<AccountType> {
    let name = name.to_lowercase();
    STANDARD_ACCOUNTS
        .iter()
        .find(|(table_name, _)| name.contains(&table_name.to_lowercase()))
        .map(|&(_, account_type)| account_type)
}

/// Outcome of resolving one account's recorded type against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeResolution {
    /// Name matched the table and the recorded type already agrees.
    Confirmed(AccountType),
    /// Name matched the table; the recorded type must be overwritten.
    Reclassify(AccountType),
    /// No name match; the recorded canonical type stands.
    Kept(AccountType),
    /// No name match and the recorded type is not canonical.
    Fallback(AccountType),
}

impl TypeResolution {
    /// The canonical type after resolution.
    #[must_use]
    pub const fn account_type(self) -> AccountType {
        match self {
            Self::Confirmed(t) | Self::Reclassify(t) | Self::Kept(t) | Self::Fallback(t) => t,
        }
    }

    /// The type to write back, if the recorded value is wrong.
    #[must_use]
    pub const fn correction(self) -> Option<AccountType> {
        match self {
            Self::Reclassify(t) | Self::Fallback(t) => Some(t),
            Self::Confirmed(_) | Self::Kept(_) => None,
        }
    }
}

/// Resolves an account's type from its name and recorded type string.
///
/// A name match wins over whatever is recorded. When the name matches
/// nothing and the recorded type is not one of the canonical five, the
/// account falls back to [`AccountType::Asset`].
#[must_use]
pub fn resolve(name: &str, recorded_type: &str) -> TypeResolution {
    match (classify(name), AccountType::parse(recorded_type)) {
        (Some(matched), Some(recorded)) if matched == recorded => {
            TypeResolution::Confirmed(matched)
        }
        (Some(matched), _) => TypeResolution::Reclassify(matched),
        (None, Some(recorded)) => TypeResolution::Kept(recorded),
        (None, None) => TypeResolution::Fallback(AccountType::Asset),
    }
}
