//! Snapshot restore tool.
//!
//! Loads a snapshot artifact written by the reconciliation pre-flight
//! and puts its collections back over the live data. Collections absent
//! from the artifact are left untouched.
//!
//! Usage: cargo run --bin restore -- <snapshot-file>

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurum_db::{LedgerStore, restore_snapshot};
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

    let Some(artifact) = std::env::args().nth(1) else {
        eprintln!("Usage: restore <snapshot-file>");
        return Ok(ExitCode::FAILURE);
    };

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to the document store
    let store = LedgerStore::connect(&config.store).await?;

    println!(
        "Restoring '{artifact}' into database '{}'...",
        config.store.database
    );
    let summary = restore_snapshot(&store, Path::new(&artifact)).await?;

    for (collection, count) in &summary.restored {
        println!("  Restored {count} documents into '{collection}'");
    }
    println!("Snapshot was captured at {}", summary.backup_timestamp);
    if !summary.statistics.is_empty() {
        println!("Counts recorded at capture time:");
        for (collection, count) in &summary.statistics {
            println!("  {collection}: {count}");
        }
    }
    println!("Restore complete!");

    Ok(ExitCode::SUCCESS)
}
