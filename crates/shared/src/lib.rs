//! Shared configuration for the Aurum reconciliation toolchain.
//!
//! This crate provides the configuration types used by every binary:
//! - Document store connection settings
//! - Report and snapshot output locations

pub mod config;

pub use config::{AppConfig, ReportingConfig, StoreConfig};
