use custody_types::{Commitment, Timestamp};

use crate::hasher::ContentHasher;

/// The fields bound by an entry commitment.
///
/// `record.observed_at` is deliberately absent: only the entry's own
/// construction time is committed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitmentInput<'a> {
    pub name: &'a str,
    pub custodian: &'a str,
    pub status: &'a str,
    pub created_at: Timestamp,
    pub previous: Commitment,
}

/// Compute the commitment for an entry's current field values.
pub fn commit(input: &CommitmentInput<'_>) -> Commitment {
    let created_at = input.created_at.to_be_bytes();
    ContentHasher::ENTRY.hash_fields(&[
        input.name.as_bytes(),
        input.custodian.as_bytes(),
        input.status.as_bytes(),
        &created_at,
        input.previous.as_bytes(),
    ])
}
