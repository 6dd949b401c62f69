//! Ledger reconciliation runner.
//!
//! Snapshots the accounting collections, corrects account types, wipes
//! and rebuilds every transaction from invoice payment evidence,
//! validates the result, and writes an audit report.
//!
//! Usage: cargo run --bin reconcile
//!
//! Exits non-zero when the run aborts or the rebuilt ledger fails
//! validation.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurum_db::LedgerStore;
use aurum_recon::gate::StoreSnapshotGate;
use aurum_recon::procedure;
use aurum_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to the document store
    let store = LedgerStore::connect(&config.store).await?;
    let gate = StoreSnapshotGate::new(store.clone(), config.reporting.snapshots_dir.clone());

    println!(
        "Reconciling ledger in database '{}'...",
        config.store.database
    );
    let outcome = procedure::run(&store, &gate, &config.reporting).await?;

    println!("Reconciliation complete!");
    println!("  Snapshot: {}", outcome.snapshot_path.display());
    println!("  Accounts corrected: {}", outcome.accounts_corrected);
    println!(
        "  Transactions deleted: {}",
        outcome.rebuild.transactions_deleted
    );
    println!("  Balances reset: {}", outcome.rebuild.balances_reset);
    println!(
        "  Payments processed: {}",
        outcome.rebuild.payments_processed
    );
    println!(
        "  Transactions created: {}",
        outcome.rebuild.transactions_created
    );
    println!(
        "  Trial balance: {} (debit {} / credit {})",
        verdict(outcome.trial_balance.balanced),
        outcome.trial_balance.debit_total,
        outcome.trial_balance.credit_total
    );
    println!(
        "  Double entry: {} (debit {} / credit {})",
        verdict(outcome.double_entry.balanced),
        outcome.double_entry.debit_total,
        outcome.double_entry.credit_total
    );
    println!("  Report: {}", outcome.report_path.display());

    if outcome.is_certified() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Validation failed; inspect the audit report before trusting the ledger.");
        Ok(ExitCode::FAILURE)
    }
}

fn verdict(balanced: bool) -> &'static str {
    if balanced { "BALANCED" } else { "NOT BALANCED" }
}
