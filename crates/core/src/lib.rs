//! Core reconciliation logic for Aurum.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! Everything here is a function of its inputs, so it can be tested without
//! a running MongoDB.
//!
//! # Modules
//!
//! - `taxonomy` - Canonical account types and name-based classification
//! - `balance` - Signed balance deltas for debit/credit entries
//! - `numbering` - Sequential transaction numbers
//! - `validation` - Trial balance and double-entry checks
//! - `report` - Audit report assembly

pub mod balance;
pub mod numbering;
pub mod report;
pub mod taxonomy;
pub mod validation;
