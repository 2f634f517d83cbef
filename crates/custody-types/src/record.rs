use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::status::CustodyStatus;
use crate::temporal::Timestamp;

/// Upper bound on the byte length of any text field.
pub const MAX_FIELD_LEN: usize = 256;

/// Attributes of one tracked unit at a point in time.
///
/// A record is owned by the ledger entry that wraps it. `name` identifies the
/// unit but is not required to be unique across a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub custodian: String,
    pub status: CustodyStatus,
    /// When the record was created or its status last changed.
    pub observed_at: Timestamp,
}

impl Record {
    /// Build a validated record observed now.
    ///
    /// `name` and `custodian` are trimmed; all three fields must be non-empty
    /// and at most [`MAX_FIELD_LEN`] bytes.
    pub fn new(
        name: impl Into<String>,
        custodian: impl Into<String>,
        status: impl Into<CustodyStatus>,
    ) -> Result<Self, TypeError> {
        let record = Self {
            name: name.into().trim().to_string(),
            custodian: custodian.into().trim().to_string(),
            status: status.into(),
            observed_at: Timestamp::now(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check field constraints on an already constructed record.
    ///
    /// Besides the rules [`Record::new`] enforces, text fields must already
    /// be trimmed and the status must be what its own label parses back to.
    pub fn validate(&self) -> Result<(), TypeError> {
        check_field("name", &self.name)?;
        check_field("custodian", &self.custodian)?;
        check_field("status", self.status.label())?;
        if !self.status.is_canonical() {
            return Err(TypeError::NonCanonicalStatus {
                label: self.status.label().to_string(),
            });
        }
        Ok(())
    }

    /// Replace the status and stamp the observation time.
    pub fn set_status(&mut self, status: CustodyStatus, at: Timestamp) {
        self.status = status;
        self.observed_at = at;
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), TypeError> {
    if value.trim().is_empty() {
        return Err(TypeError::EmptyField { field });
    }
    if value.trim() != value {
        return Err(TypeError::UntrimmedField { field });
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(TypeError::FieldTooLong {
            field,
            len: value.len(),
            max: MAX_FIELD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn new_trims_and_stamps() {
        let record = Record::new("  Aspirin 100mg ", " Acme Pharma", "Produced").unwrap();
        assert_eq!(record.name, "Aspirin 100mg");
        assert_eq!(record.custodian, "Acme Pharma");
        assert_eq!(record.status, CustodyStatus::Produced);
        assert!(record.observed_at.physical_ms > 0);
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            Record::new("", "M1", "Produced").unwrap_err(),
            TypeError::EmptyField { field: "name" }
        );
        assert_eq!(
            Record::new("A", "   ", "Produced").unwrap_err(),
            TypeError::EmptyField { field: "custodian" }
        );
        assert_eq!(
            Record::new("A", "M1", " ").unwrap_err(),
            TypeError::EmptyField { field: "status" }
        );
    }

    #[test]
    fn oversized_field_is_rejected() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        assert_eq!(
            Record::new(long, "M1", "Produced").unwrap_err(),
            TypeError::FieldTooLong {
                field: "name",
                len: MAX_FIELD_LEN + 1,
                max: MAX_FIELD_LEN
            }
        );
    }

    #[test]
    fn validate_catches_literal_construction() {
        let record = Record {
            name: "A".into(),
            custodian: String::new(),
            status: CustodyStatus::Produced,
            observed_at: Timestamp::zero(),
        };
        assert_eq!(
            record.validate().unwrap_err(),
            TypeError::EmptyField { field: "custodian" }
        );
    }

    #[test]
    fn validate_rejects_untrimmed_fields() {
        let mut record = Record::new("A", "M1", "Produced").unwrap();
        record.name = " A".into();
        assert_eq!(
            record.validate().unwrap_err(),
            TypeError::UntrimmedField { field: "name" }
        );

        record.name = "A".into();
        record.custodian = "M1\n".into();
        assert_eq!(
            record.validate().unwrap_err(),
            TypeError::UntrimmedField { field: "custodian" }
        );
    }

    #[test]
    fn validate_rejects_non_canonical_status() {
        let mut record = Record::new("A", "M1", "Produced").unwrap();
        for label in ["shipped", "In Transit", "DELIVERED"] {
            record.status = CustodyStatus::Other(label.into());
            assert_eq!(
                record.validate().unwrap_err(),
                TypeError::NonCanonicalStatus {
                    label: label.into()
                },
                "{label}"
            );
        }

        record.status = CustodyStatus::Other("Recalled".into());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn set_status_updates_observation_time() {
        let mut record = Record::new("A", "M1", "Produced").unwrap();
        let at = Timestamp::new(record.observed_at.physical_ms + 10, 0);
        record.set_status(CustodyStatus::Shipped, at);
        assert_eq!(record.status, CustodyStatus::Shipped);
        assert_eq!(record.observed_at, at);
    }

    proptest! {
        #[test]
        fn any_visible_fields_are_accepted(
            name in "[A-Za-z0-9][A-Za-z0-9 ]{0,40}",
            custodian in "[A-Za-z][A-Za-z ]{0,40}",
        ) {
            let record = Record::new(name.clone(), custodian.clone(), "Shipped").unwrap();
            prop_assert_eq!(record.name, name.trim());
            prop_assert_eq!(record.custodian, custodian.trim());
        }
    }
}
