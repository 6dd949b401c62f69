//! The reconciliation procedure.
//!
//! Orders the stages: snapshot gate, account type corrections, the
//! destructive rebuild, both validations, and the audit report. The
//! gate runs first, and its failure aborts the run before any write
//! touches the store.

use std::path::PathBuf;

use tracing::{info, warn};

use aurum_core::validation::{DoubleEntryCheck, TrialBalanceCheck};
use aurum_db::{LedgerStore, SnapshotError, StoreError};
use aurum_shared::config::ReportingConfig;

use crate::gate::SnapshotGate;
use crate::stages::rebuild::RebuildOutcome;
use crate::stages::report::ReportError;
use crate::stages::{classify, rebuild, report, validate};

/// Errors that abort the reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The pre-flight snapshot failed. Nothing was modified.
    #[error("snapshot gate refused the run: {0}")]
    Snapshot(#[from] SnapshotError),
    /// A store operation failed mid-run.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The rebuilt data is in place but the audit report could not be
    /// produced.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// What a completed run did and found.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Path of the pre-flight snapshot artifact.
    pub snapshot_path: PathBuf,
    /// Accounts whose stored type was corrected.
    pub accounts_corrected: u64,
    /// Counters from the destructive rebuild.
    pub rebuild: RebuildOutcome,
    /// Trial balance verdict and totals.
    pub trial_balance: TrialBalanceCheck,
    /// Double-entry verdict and totals.
    pub double_entry: DoubleEntryCheck,
    /// Path of the audit report artifact.
    pub report_path: PathBuf,
}

impl ReconcileOutcome {
    /// True when both validations passed.
    #[must_use]
    pub fn is_certified(&self) -> bool {
        self.trial_balance.balanced && self.double_entry.balanced
    }
}

/// Runs the full reconciliation against the store behind the gate.
///
/// # Errors
///
/// Returns [`ReconcileError::Snapshot`] when the pre-flight snapshot
/// fails (the store is untouched), [`ReconcileError::Store`] when a
/// stage fails mid-run, and [`ReconcileError::Report`] when the rebuilt
/// data is committed but the report cannot be written.
pub async fn run(
    store: &LedgerStore,
    gate: &dyn SnapshotGate,
    reporting: &ReportingConfig,
) -> Result<ReconcileOutcome, ReconcileError> {
    let receipt = gate.capture().await?;
    info!(path = %receipt.path.display(), "pre-flight snapshot written");

    let accounts_corrected = classify::classify_accounts(&store.accounts()).await?;
    let rebuild = rebuild::run(store).await?;
    let trial_balance = validate::check_trial_balance(store).await?;
    let double_entry = validate::check_double_entry(store).await?;
    let report_path =
        report::write_audit_report(store, &reporting.reports_dir, &trial_balance, &double_entry)
            .await?;

    let outcome = ReconcileOutcome {
        snapshot_path: receipt.path,
        accounts_corrected,
        rebuild,
        trial_balance,
        double_entry,
        report_path,
    };
    if outcome.is_certified() {
        info!(
            accounts_corrected = outcome.accounts_corrected,
            transactions_created = outcome.rebuild.transactions_created,
            "reconciliation certified"
        );
    } else {
        warn!(
            trial_balance = outcome.trial_balance.balanced,
            double_entry = outcome.double_entry.balanced,
            "reconciliation finished without certification"
        );
    }
    Ok(outcome)
}
