use tracing::debug;

use custody_crypto::HashChainVerifier;
use custody_types::{Commitment, CustodyStatus, Record, Timestamp};

use crate::config::{LedgerConfig, UpdatePolicy};
use crate::entry::Entry;
use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// In-memory, single-writer custody ledger.
///
/// Entries are kept in insertion order. Mutating operations take `&mut self`;
/// callers that need to share a ledger across threads wrap it in their own
/// lock.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    entries: Vec<Entry>,
}

impl Ledger {
    /// An empty ledger with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger governed by `config`.
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    /// Adopt an externally held entry sequence as-is.
    ///
    /// Nothing is checked on load; call [`verify`](LedgerReader::verify)
    /// before trusting the result.
    pub fn from_entries(entries: Vec<Entry>, config: LedgerConfig) -> Self {
        Self { config, entries }
    }

    /// Adopt an externally held entry sequence only if its chain verifies.
    ///
    /// The earliest fault is returned as [`LedgerError::Tampered`].
    pub fn from_verified_entries(
        entries: Vec<Entry>,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        HashChainVerifier::verify_chain(&entries)?;
        Ok(Self::from_entries(entries, config))
    }

    /// Give up the ledger, returning its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// The configuration this ledger was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of entries in the chain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at chain position `index`.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// The most recent entry.
    pub fn head(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Chain a record onto the tail of the ledger.
    pub fn append(&mut self, record: Record) -> Result<Entry, LedgerError> {
        record.validate()?;
        Ok(self.push(record).clone())
    }

    /// Record a new status for the first unit named `name`.
    ///
    /// Under [`UpdatePolicy::AppendTransition`] the unit's latest record is
    /// copied with the new status and appended, so name and custodian carry
    /// over exactly as stored. Under [`UpdatePolicy::RewriteInPlace`]
    /// the first matching entry is edited and only its own commitment is
    /// recomputed, keeping its original `created_at` and previous commitment.
    pub fn update_status(
        &mut self,
        name: &str,
        new_status: impl Into<CustodyStatus>,
    ) -> Result<Entry, LedgerError> {
        let status = new_status.into();
        let position = self.position(name)?;

        match self.config.update_policy {
            UpdatePolicy::AppendTransition => {
                let current = self.latest(name).unwrap_or(&self.entries[position]);
                let mut record = current.record.clone();
                let observed_at = Timestamp::after(&record.observed_at);
                record.set_status(status, observed_at);
                record.validate()?;
                Ok(self.push(record).clone())
            }
            UpdatePolicy::RewriteInPlace => {
                let entry = &mut self.entries[position];
                let mut record = entry.record.clone();
                let observed_at = Timestamp::after(&record.observed_at);
                record.set_status(status, observed_at);
                record.validate()?;

                entry.record = record;
                entry.refresh_commitment();
                debug!(
                    index = position,
                    name,
                    status = %entry.record.status,
                    commitment = %entry.commitment.short_hex(),
                    "rewrote entry status in place"
                );
                Ok(entry.clone())
            }
        }
    }

    /// Hand a tracked unit over to a new custodian.
    ///
    /// Always appends, regardless of the update policy.
    pub fn transfer(
        &mut self,
        name: &str,
        custodian: impl Into<String>,
        status: impl Into<CustodyStatus>,
    ) -> Result<Entry, LedgerError> {
        self.position(name)?;
        let record = Record::new(name, custodian, status)?;
        Ok(self.push(record).clone())
    }

    fn position(&self, name: &str) -> Result<usize, LedgerError> {
        self.entries
            .iter()
            .position(|e| e.record.name == name)
            .ok_or_else(|| LedgerError::NotFound {
                name: name.to_string(),
            })
    }

    fn push(&mut self, record: Record) -> &Entry {
        let previous = self
            .entries
            .last()
            .map(|e| e.commitment)
            .unwrap_or(Commitment::EMPTY);
        let created_at = match self.entries.last() {
            Some(last) => Timestamp::after(&last.created_at),
            None => Timestamp::now(),
        };

        let entry = Entry::new(record, previous, created_at);
        debug!(
            index = self.entries.len(),
            name = %entry.record.name,
            status = %entry.record.status,
            commitment = %entry.commitment.short_hex(),
            "appended entry"
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }
}

impl LedgerReader for Ledger {
    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
