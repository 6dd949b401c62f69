//! Report stage: writes the audit report artifact.
//!
//! Assembles the dataset counts, per-type account breakdowns, and both
//! validation outcomes into one JSON file under the configured reports
//! directory. The validation results are taken as arguments rather than
//! recomputed so the report states exactly what the run certified.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use aurum_core::report::{AccountLine, AuditReport, ReportSummary};
use aurum_core::validation::{DoubleEntryCheck, TrialBalanceCheck};
use aurum_db::{LedgerStore, StoreError};

/// Errors surfaced while producing the audit report.
///
/// A run whose data work succeeded but whose report cannot be written
/// still fails: the artifact is the evidence operators act on.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The underlying reads failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The report could not be serialized.
    #[error("failed to serialize audit report: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The artifact could not be written to disk.
    #[error("failed to write audit report: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the audit report and returns its path.
///
/// # Errors
///
/// Returns [`ReportError`] when the dataset reads, serialization, or the
/// filesystem write fail.
pub async fn write_audit_report(
    store: &LedgerStore,
    reports_dir: &Path,
    trial_balance: &TrialBalanceCheck,
    double_entry: &DoubleEntryCheck,
) -> Result<PathBuf, ReportError> {
    let accounts = store.accounts().list_active().await?;
    let summary = ReportSummary {
        total_accounts: u64::try_from(accounts.len()).unwrap_or(u64::MAX),
        total_transactions: store.transactions().count_active().await?,
        total_invoices: store.invoices().count_active().await?,
        invoices_with_payments: store.invoices().count_with_payments().await?,
    };

    let report = AuditReport::assemble(
        Utc::now(),
        summary,
        accounts.iter().map(|account| {
            (
                account.account_type(),
                AccountLine {
                    name: account.name.clone(),
                    balance: account.current_balance,
                },
            )
        }),
        trial_balance,
        double_entry,
    );

    tokio::fs::create_dir_all(reports_dir).await?;
    let path = reports_dir.join(report.file_name());
    let body = serde_json::to_vec_pretty(&report)?;
    tokio::fs::write(&path, body).await?;

    info!(path = %path.display(), "audit report written");
    Ok(path)
}
