use std::collections::BTreeMap;

use serde::Serialize;

use custody_types::{Commitment, CustodyStatus, Timestamp};

use crate::traits::LedgerReader;

/// Current state of one tracked unit, reconstructed from its entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitState {
    pub custodian: String,
    pub status: CustodyStatus,
    /// Number of entries recorded for the unit.
    pub transitions: usize,
    pub first_recorded: Timestamp,
    pub last_recorded: Timestamp,
    pub latest_commitment: Commitment,
}

/// Latest custody state for every unit in a ledger, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CustodyProjection {
    pub units: BTreeMap<String, UnitState>,
}

impl CustodyProjection {
    /// Fold the ledger's entries in order; later entries win.
    pub fn build<R: LedgerReader + ?Sized>(reader: &R) -> Self {
        let mut units: BTreeMap<String, UnitState> = BTreeMap::new();

        for entry in reader.entries() {
            let record = &entry.record;
            units
                .entry(record.name.clone())
                .and_modify(|state| {
                    state.custodian = record.custodian.clone();
                    state.status = record.status.clone();
                    state.transitions += 1;
                    state.last_recorded = entry.created_at;
                    state.latest_commitment = entry.commitment;
                })
                .or_insert_with(|| UnitState {
                    custodian: record.custodian.clone(),
                    status: record.status.clone(),
                    transitions: 1,
                    first_recorded: entry.created_at,
                    last_recorded: entry.created_at,
                    latest_commitment: entry.commitment,
                });
        }

        Self { units }
    }

    /// State of the unit called `name`, if it has any entries.
    pub fn get(&self, name: &str) -> Option<&UnitState> {
        self.units.get(name)
    }

    /// Units whose latest status is `status`.
    pub fn with_status<'a>(&'a self, status: &'a CustodyStatus) -> impl Iterator<Item = &'a str> {
        self.units
            .iter()
            .filter(move |(_, state)| &state.status == status)
            .map(|(name, _)| name.as_str())
    }

    /// Number of distinct units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use custody_types::Record;

    use super::*;
    use crate::ledger::Ledger;

    #[test]
    fn empty_ledger_projects_nothing() {
        let projection = CustodyProjection::build(&Ledger::new());
        assert!(projection.is_empty());
    }

    #[test]
    fn latest_entry_wins() {
        let mut ledger = Ledger::new();
        ledger.append(Record::new("A", "M1", "Produced").unwrap()).unwrap();
        ledger.append(Record::new("B", "M2", "Produced").unwrap()).unwrap();
        ledger.transfer("A", "Carrier", "InTransit").unwrap();
        let last = ledger.update_status("A", "Delivered").unwrap();

        let projection = CustodyProjection::build(&ledger);
        assert_eq!(projection.len(), 2);

        let a = projection.get("A").unwrap();
        assert_eq!(a.custodian, "Carrier");
        assert_eq!(a.status, CustodyStatus::Delivered);
        assert_eq!(a.transitions, 3);
        assert_eq!(a.latest_commitment, last.commitment);
        assert!(a.last_recorded > a.first_recorded);

        let b = projection.get("B").unwrap();
        assert_eq!(b.transitions, 1);
        assert_eq!(b.first_recorded, b.last_recorded);
    }

    #[test]
    fn filter_by_status() {
        let mut ledger = Ledger::new();
        ledger.append(Record::new("A", "M1", "Produced").unwrap()).unwrap();
        ledger.append(Record::new("B", "M2", "Produced").unwrap()).unwrap();
        ledger.update_status("B", "Shipped").unwrap();

        let projection = CustodyProjection::build(ledger.entries());
        let produced: Vec<_> = projection.with_status(&CustodyStatus::Produced).collect();
        assert_eq!(produced, vec!["A"]);
    }
}
