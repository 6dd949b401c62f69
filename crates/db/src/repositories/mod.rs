//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for collection operations,
//! hiding the MongoDB driver details from the rest of the application.

pub mod account;
pub mod invoice;
pub mod transaction;

pub use account::AccountRepository;
pub use invoice::InvoiceRepository;
pub use transaction::TransactionRepository;
