use std::collections::BTreeSet;

use custody_crypto::HashChainVerifier;

use crate::entry::Entry;
use crate::error::LedgerError;
use crate::verdict::{AuditReport, Verdict};

/// Read boundary for custody ledger queries and verification.
///
/// Only [`entries`](LedgerReader::entries) is required; every query is a
/// linear scan in insertion order. Implemented for [`Ledger`](crate::Ledger)
/// and for plain entry slices, so a sequence held elsewhere can be checked
/// without building a ledger.
pub trait LedgerReader {
    fn entries(&self) -> &[Entry];

    /// First entry (in insertion order) whose record name equals `name`.
    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries().iter().find(|e| e.record.name == name)
    }

    /// Like [`find`](LedgerReader::find), with a miss as [`LedgerError::NotFound`].
    fn find_or_err(&self, name: &str) -> Result<&Entry, LedgerError> {
        self.find(name).ok_or_else(|| LedgerError::NotFound {
            name: name.to_string(),
        })
    }

    /// Last entry for `name`, i.e. its current state.
    fn latest(&self, name: &str) -> Option<&Entry> {
        self.entries().iter().rev().find(|e| e.record.name == name)
    }

    /// Every entry for `name`, oldest first.
    fn history(&self, name: &str) -> Vec<&Entry> {
        self.entries()
            .iter()
            .filter(|e| e.record.name == name)
            .collect()
    }

    /// Distinct unit names, sorted.
    fn unit_names(&self) -> BTreeSet<&str> {
        self.entries()
            .iter()
            .map(|e| e.record.name.as_str())
            .collect()
    }

    /// Check linkage and self-consistency, stopping at the earliest fault.
    fn verify(&self) -> Verdict {
        let verdict = Verdict::from(HashChainVerifier::first_fault(self.entries()));
        match &verdict {
            Verdict::Valid => {
                tracing::debug!(entries = self.entries().len(), "chain verified");
            }
            Verdict::Invalid { index, failure } => {
                tracing::warn!(index = *index, kind = failure.kind(), "chain verification failed");
            }
        }
        verdict
    }

    /// Check every position and collect all faults.
    fn audit(&self) -> AuditReport {
        let violations = HashChainVerifier::all_faults(self.entries());
        AuditReport::new(self.entries().len(), self.unit_names().len(), violations)
    }
}

impl LedgerReader for [Entry] {
    fn entries(&self) -> &[Entry] {
        self
    }
}

impl LedgerReader for Vec<Entry> {
    fn entries(&self) -> &[Entry] {
        self
    }
}
