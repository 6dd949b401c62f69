//! Reconciliation engine for the shop's accounting data.
//!
//! The procedure runs destructive stages in a fixed order behind a
//! snapshot gate: correct account types, wipe and rebuild every
//! transaction from invoice payment evidence, validate the result, and
//! write an audit report.
//!
//! # Modules
//!
//! - `gate` - Pre-flight snapshot gate
//! - `procedure` - The ordered run and its outcome
//! - `stages` - Individual stages: classify, rebuild, validate, report

pub mod gate;
pub mod procedure;
pub mod stages;
