//! Tamper-evident custody ledger.
//!
//! This crate is the heart of the workspace. It provides:
//! - [`Entry`]: a record wrapped with a commitment to its content and predecessor
//! - [`Ledger`]: append, status updates, custody transfers, and lookup
//! - [`LedgerReader`]: read-side queries and verification over any entry slice
//! - [`Verdict`] / [`AuditReport`]: first-fault and exhaustive chain checks
//! - [`CustodyProjection`]: latest state per tracked unit

pub mod config;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod projection;
pub mod traits;
pub mod verdict;

pub use config::{LedgerConfig, UpdatePolicy};
pub use custody_crypto::{ChainFault, Failure};
pub use entry::Entry;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use projection::{CustodyProjection, UnitState};
pub use traits::LedgerReader;
pub use verdict::{AuditReport, Verdict};
