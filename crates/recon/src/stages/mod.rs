//! Sequential stages of the reconciliation procedure.
//!
//! Each stage runs to completion over the full dataset before the next
//! one starts; there is no pipelining between them.

pub mod classify;
pub mod rebuild;
pub mod report;
pub mod validate;
