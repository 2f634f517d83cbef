use custody_types::Commitment;

/// Trait for items that participate in a hash chain.
pub trait ChainLinked {
    /// The item's stored commitment.
    fn commitment(&self) -> Commitment;
    /// The stored commitment of the previous item ([`Commitment::EMPTY`] for genesis).
    fn previous_commitment(&self) -> Commitment;
    /// A fresh commitment over the item's current fields.
    fn recompute(&self) -> Commitment;
}

/// Which integrity condition failed at a chain position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// The stored predecessor reference does not match the predecessor's
    /// stored commitment (or is not empty at index 0).
    Linkage {
        expected: Commitment,
        found: Commitment,
    },
    /// The stored commitment does not match a recomputation over the
    /// item's current fields.
    SelfConsistency {
        stored: Commitment,
        computed: Commitment,
    },
}

impl Failure {
    /// Short human-readable name of the failed condition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linkage { .. } => "linkage",
            Self::SelfConsistency { .. } => "self-consistency",
        }
    }
}

/// A failure located at a chain index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainFault {
    pub index: usize,
    pub failure: Failure,
}

/// Hash chain integrity verifier.
///
/// Positions are visited in increasing index order. At each position the
/// linkage condition is checked before self-consistency.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// The earliest fault in the chain, if any.
    pub fn first_fault<T: ChainLinked>(items: &[T]) -> Option<ChainFault> {
        (0..items.len()).find_map(|index| Self::faults_at(items, index).into_iter().next())
    }

    /// Every fault in the chain, in index order.
    pub fn all_faults<T: ChainLinked>(items: &[T]) -> Vec<ChainFault> {
        (0..items.len())
            .flat_map(|index| Self::faults_at(items, index))
            .collect()
    }

    /// Verify a chain, reporting the earliest fault as a [`ChainError`].
    pub fn verify_chain<T: ChainLinked>(items: &[T]) -> Result<(), ChainError> {
        match Self::first_fault(items) {
            None => Ok(()),
            Some(fault) => Err(ChainError::from(fault)),
        }
    }

    fn faults_at<T: ChainLinked>(items: &[T], index: usize) -> Vec<ChainFault> {
        let item = &items[index];
        let mut faults = Vec::with_capacity(2);

        let expected = match index {
            0 => Commitment::EMPTY,
            _ => items[index - 1].commitment(),
        };
        let found = item.previous_commitment();
        if found != expected {
            faults.push(ChainFault {
                index,
                failure: Failure::Linkage { expected, found },
            });
        }

        let stored = item.commitment();
        let computed = item.recompute();
        if stored != computed {
            faults.push(ChainFault {
                index,
                failure: Failure::SelfConsistency { stored, computed },
            });
        }

        faults
    }
}

/// Errors from chain verification.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("genesis entry references a previous commitment (should be empty)")]
    GenesisHasPrevious,

    #[error("broken link at index {index}: previous commitment does not match")]
    BrokenLink { index: usize },

    #[error("hash mismatch at index {index}: computed commitment differs from stored")]
    HashMismatch { index: usize },
}

impl From<ChainFault> for ChainError {
    fn from(fault: ChainFault) -> Self {
        match fault.failure {
            Failure::Linkage { .. } if fault.index == 0 => Self::GenesisHasPrevious,
            Failure::Linkage { .. } => Self::BrokenLink { index: fault.index },
            Failure::SelfConsistency { .. } => Self::HashMismatch { index: fault.index },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::ContentHasher;

    struct TestLink {
        hash: Commitment,
        prev: Commitment,
        payload: Vec<u8>,
    }

    impl ChainLinked for TestLink {
        fn commitment(&self) -> Commitment {
            self.hash
        }
        fn previous_commitment(&self) -> Commitment {
            self.prev
        }
        fn recompute(&self) -> Commitment {
            ContentHasher::ENTRY.hash_fields(&[&self.payload, self.prev.as_bytes()])
        }
    }

    fn build_chain(count: usize) -> Vec<TestLink> {
        let mut chain: Vec<TestLink> = Vec::new();
        let mut prev = Commitment::EMPTY;

        for i in 0..count {
            let mut link = TestLink {
                hash: Commitment::EMPTY,
                prev,
                payload: format!("entry-{i}").into_bytes(),
            };
            link.hash = link.recompute();
            prev = link.hash;
            chain.push(link);
        }

        chain
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: Vec<TestLink> = vec![];
        assert!(HashChainVerifier::verify_chain(&chain).is_ok());
        assert!(HashChainVerifier::all_faults(&chain).is_empty());
    }

    #[test]
    fn single_and_multi_entry_chains() {
        assert!(HashChainVerifier::verify_chain(&build_chain(1)).is_ok());
        assert!(HashChainVerifier::verify_chain(&build_chain(10)).is_ok());
    }

    #[test]
    fn genesis_with_previous_fails() {
        let mut chain = build_chain(2);
        chain[0].prev = Commitment::from_hash([1; 32]);
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::GenesisHasPrevious);
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2].prev = Commitment::from_hash([99; 32]);
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
    }

    #[test]
    fn tampered_payload_detected() {
        let mut chain = build_chain(3);
        chain[1].payload = b"tampered".to_vec();
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { index: 1 });
    }

    #[test]
    fn first_fault_prefers_earliest_index() {
        let mut chain = build_chain(4);
        chain[3].payload = b"late".to_vec();
        chain[1].payload = b"early".to_vec();
        let fault = HashChainVerifier::first_fault(&chain).unwrap();
        assert_eq!(fault.index, 1);
        assert_eq!(fault.failure.kind(), "self-consistency");
    }

    #[test]
    fn linkage_is_reported_before_self_consistency() {
        let mut chain = build_chain(3);
        chain[1].prev = Commitment::from_hash([5; 32]);
        let fault = HashChainVerifier::first_fault(&chain).unwrap();
        assert_eq!(fault.index, 1);
        assert!(matches!(fault.failure, Failure::Linkage { .. }));

        // recompute() also covers prev, so the same position fails both checks
        let all = HashChainVerifier::all_faults(&chain);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|f| f.index == 1));
    }

    #[test]
    fn rewritten_hash_breaks_successor_link() {
        let mut chain = build_chain(3);
        chain[0].payload = b"rewritten".to_vec();
        chain[0].hash = chain[0].recompute();

        let fault = HashChainVerifier::first_fault(&chain).unwrap();
        assert_eq!(fault.index, 1);
        assert_eq!(
            fault.failure,
            Failure::Linkage {
                expected: chain[0].hash,
                found: chain[1].prev,
            }
        );
    }

    #[test]
    fn removed_entry_detected() {
        let mut chain = build_chain(4);
        chain.remove(2);
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
    }

    #[test]
    fn swapped_entries_detected() {
        let mut chain = build_chain(4);
        chain.swap(1, 2);
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 1 });
    }
}
