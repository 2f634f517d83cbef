use serde::{Deserialize, Serialize};

use custody_crypto::{commit, ChainLinked, CommitmentInput};
use custody_types::{Commitment, Record, Timestamp};

/// A record bound into the ledger's hash chain.
///
/// `commitment` covers the record's name, custodian and status, the entry's
/// `created_at`, and `previous_commitment`. Fields are public so that
/// externally held sequences can be inspected and reassembled; anything that
/// changes a committed field without recomputing `commitment` is reported by
/// verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub record: Record,
    pub previous_commitment: Commitment,
    pub created_at: Timestamp,
    pub commitment: Commitment,
}

impl Entry {
    /// Wrap a record, computing its commitment.
    pub fn new(record: Record, previous_commitment: Commitment, created_at: Timestamp) -> Self {
        let mut entry = Self {
            record,
            previous_commitment,
            created_at,
            commitment: Commitment::EMPTY,
        };
        entry.commitment = entry.recompute();
        entry
    }

    /// Fresh commitment over the entry's current field values.
    pub fn recompute(&self) -> Commitment {
        commit(&CommitmentInput {
            name: &self.record.name,
            custodian: &self.record.custodian,
            status: self.record.status.label(),
            created_at: self.created_at,
            previous: self.previous_commitment,
        })
    }

    /// Returns `true` if the stored commitment matches a recomputation.
    pub fn is_self_consistent(&self) -> bool {
        self.commitment == self.recompute()
    }

    /// Returns `true` if this is a first entry (no predecessor).
    pub fn is_genesis(&self) -> bool {
        self.previous_commitment.is_empty()
    }

    pub(crate) fn refresh_commitment(&mut self) {
        self.commitment = self.recompute();
    }
}

impl ChainLinked for Entry {
    fn commitment(&self) -> Commitment {
        self.commitment
    }

    fn previous_commitment(&self) -> Commitment {
        self.previous_commitment
    }

    fn recompute(&self) -> Commitment {
        Entry::recompute(self)
    }
}
