//! Cryptographic primitives for the custody ledger.
//!
//! Provides domain-separated BLAKE3 hashing, the entry commitment function,
//! and hash chain verification.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod chain;
pub mod commit;
pub mod hasher;

pub use chain::{ChainError, ChainFault, ChainLinked, Failure, HashChainVerifier};
pub use commit::{commit, CommitmentInput};
pub use hasher::ContentHasher;
