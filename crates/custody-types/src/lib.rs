//! Foundation types for the custody ledger.
//!
//! Every other custody crate depends on `custody-types`.
//!
//! # Key Types
//!
//! - [`Record`]: Attributes of one tracked unit at a point in time
//! - [`CustodyStatus`]: Lifecycle label (Produced, Shipped, InTransit, Delivered, ...)
//! - [`Timestamp`]: Wall-clock milliseconds plus a logical counter
//! - [`Commitment`]: 32-byte digest binding an entry to its content and predecessor

pub mod commitment;
pub mod error;
pub mod record;
pub mod status;
pub mod temporal;

pub use commitment::Commitment;
pub use error::TypeError;
pub use record::Record;
pub use status::CustodyStatus;
pub use temporal::Timestamp;
