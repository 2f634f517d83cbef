use std::fmt;

use custody_crypto::{ChainFault, Failure};

/// Outcome of a first-fault chain verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// The earliest failing position and the condition that failed there.
    Invalid { index: usize, failure: Failure },
}

impl Verdict {
    /// Returns `true` if every position passed both checks.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failing index, if any.
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            Self::Valid => None,
            Self::Invalid { index, .. } => Some(*index),
        }
    }
}

impl From<Option<ChainFault>> for Verdict {
    fn from(fault: Option<ChainFault>) -> Self {
        match fault {
            None => Self::Valid,
            Some(ChainFault { index, failure }) => Self::Invalid { index, failure },
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid { index, failure } => match failure {
                Failure::Linkage { expected, found } => write!(
                    f,
                    "invalid at index {index}: linkage (expected {}, found {})",
                    expected.short_hex(),
                    found.short_hex()
                ),
                Failure::SelfConsistency { stored, computed } => write!(
                    f,
                    "invalid at index {index}: self-consistency (stored {}, computed {})",
                    stored.short_hex(),
                    computed.short_hex()
                ),
            },
        }
    }
}

/// Result of an exhaustive chain audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub entry_count: usize,
    pub unit_count: usize,
    pub linkage_valid: bool,
    pub commitments_valid: bool,
    pub violations: Vec<ChainFault>,
}

impl AuditReport {
    pub(crate) fn new(entry_count: usize, unit_count: usize, violations: Vec<ChainFault>) -> Self {
        let linkage_valid = !violations
            .iter()
            .any(|v| matches!(v.failure, Failure::Linkage { .. }));
        let commitments_valid = !violations
            .iter()
            .any(|v| matches!(v.failure, Failure::SelfConsistency { .. }));
        Self {
            entry_count,
            unit_count,
            linkage_valid,
            commitments_valid,
            violations,
        }
    }

    /// Returns `true` if no violations were found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The earliest violation, which is what `verify()` reports.
    pub fn first(&self) -> Verdict {
        Verdict::from(self.violations.first().copied())
    }
}
