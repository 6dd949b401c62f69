//! Sequential transaction numbering.
//!
//! Numbers follow the `TXN-<year>-<seq>` shape the shop app has always
//! written, with the sequence zero-padded to four digits. The sequence
//! comes from a live-transaction count supplied by the caller, so the
//! source can later move to an atomic counter without touching call sites.

/// Transaction numbers for one debit/credit pair inserted back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPair {
    /// Number for the debit leg.
    pub debit: String,
    /// Number for the credit leg, one sequence past the debit.
    pub credit: String,
}

/// Formats a single transaction number.
///
/// Sequences above 9999 keep their full width; the padding is a floor,
/// not a ceiling.
#[must_use]
pub fn transaction_number(year: i32, sequence: u64) -> String {
    format!("TXN-{year}-{sequence:04}")
}

/// Numbers the two legs of a pair from the count of live transactions
/// observed just before the debit leg is inserted.
///
/// The debit takes `live_count + 1`. The credit takes `live_count + 2`,
/// which is exactly what a fresh count would yield once the debit insert
/// has landed.
#[must_use]
pub fn pair_after(year: i32, live_count: u64) -> NumberPair {
    NumberPair {
        debit: transaction_number(year, live_count + 1),
        credit: transaction_number(year, live_count + 2),
    }
}
