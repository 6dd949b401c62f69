//! Audit report assembly.
//!
//! The report is the one artifact operators keep after a run: dataset
//! counts, per-type balance breakdowns, and both validation outcomes in a
//! single JSON document. Amounts serialize as JSON numbers because the
//! downstream tooling that reads these files expects them that way.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::taxonomy::AccountType;
use crate::validation::{DoubleEntryCheck, TrialBalanceCheck};

/// Breakdown key for accounts whose stored type is outside the canonical
/// five.
pub const UNKNOWN_TYPE_KEY: &str = "unknown";

/// One account line inside a type breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct AccountLine {
    /// Account name.
    pub name: String,
    /// Current balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Aggregate over all active accounts of one type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeBreakdown {
    /// Number of accounts in this group.
    pub count: u64,
    /// Sum of their current balances.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    /// The accounts themselves.
    pub accounts: Vec<AccountLine>,
}

/// Dataset counts at report time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportSummary {
    /// Active accounts.
    pub total_accounts: u64,
    /// Active transactions.
    pub total_transactions: u64,
    /// Active invoices.
    pub total_invoices: u64,
    /// Active invoices with a positive paid amount.
    pub invoices_with_payments: u64,
}

/// Validation outcomes embedded in the report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSection {
    /// Trial balance agreed within tolerance.
    pub trial_balance_valid: bool,
    /// Trial balance debit-normal side.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_debit_balance: Decimal,
    /// Trial balance credit-normal side.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_credit_balance: Decimal,
    /// Debit and credit legs agreed within tolerance.
    pub double_entry_valid: bool,
}

/// Complete audit report artifact.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Report generation time.
    pub timestamp: DateTime<Utc>,
    /// Dataset counts.
    pub summary: ReportSummary,
    /// Per-type account breakdowns, keyed by lowercase type name. Only
    /// types actually present in the data appear.
    pub accounts_by_type: BTreeMap<String, TypeBreakdown>,
    /// Validation outcomes.
    pub validation: ValidationSection,
}

impl AuditReport {
    /// Assembles a report from dataset counts, active account lines, and
    /// the two validation outcomes.
    #[must_use]
    pub fn assemble<I>(
        timestamp: DateTime<Utc>,
        summary: ReportSummary,
        accounts: I,
        trial: &TrialBalanceCheck,
        double_entry: &DoubleEntryCheck,
    ) -> Self
    where
        I: IntoIterator<Item = (Option<AccountType>, AccountLine)>,
    {
        let mut accounts_by_type: BTreeMap<String, TypeBreakdown> = BTreeMap::new();
        for (account_type, line) in accounts {
            let key = account_type.map_or(UNKNOWN_TYPE_KEY, AccountType::as_str);
            let group = accounts_by_type.entry(key.to_string()).or_default();
            group.count += 1;
            group.total_balance += line.balance;
            group.accounts.push(line);
        }

        Self {
            timestamp,
            summary,
            accounts_by_type,
            validation: ValidationSection {
                trial_balance_valid: trial.balanced,
                total_debit_balance: trial.debit_total,
                total_credit_balance: trial.credit_total,
                double_entry_valid: double_entry.balanced,
            },
        }
    }

    /// File name for this report, derived from its timestamp.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "audit_report_{}.json",
            self.timestamp.format("%Y%m%d_%H%M%S")
        )
    }
}
