use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle label of a tracked unit.
///
/// The set is open-ended: the well-known stages have their own variants and
/// anything else is carried verbatim in [`CustodyStatus::Other`]. The
/// commitment function binds the [`label`](CustodyStatus::label), so
/// `Other("Recalled")` and a future `Recalled` variant would hash identically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CustodyStatus {
    Produced,
    Shipped,
    InTransit,
    Delivered,
    Other(String),
}

impl CustodyStatus {
    /// Parse a free-text label.
    ///
    /// Matching of the well-known stages ignores case, whitespace, `-` and
    /// `_`, so `"in transit"`, `"In-Transit"` and `"InTransit"` are the same.
    /// Unknown labels are kept trimmed but otherwise unchanged.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let folded: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "produced" => Self::Produced,
            "shipped" => Self::Shipped,
            "intransit" => Self::InTransit,
            "delivered" => Self::Delivered,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Canonical label, as bound by the commitment function.
    pub fn label(&self) -> &str {
        match self {
            Self::Produced => "Produced",
            Self::Shipped => "Shipped",
            Self::InTransit => "InTransit",
            Self::Delivered => "Delivered",
            Self::Other(label) => label,
        }
    }

    /// Returns `true` if parsing [`label`](Self::label) yields `self` again.
    ///
    /// Every value produced by [`parse`](Self::parse) is canonical. A
    /// hand-built `Other("shipped")` or `Other(" x")` is not, and would change
    /// its committed label after a serde round trip.
    pub fn is_canonical(&self) -> bool {
        Self::parse(self.label()) == *self
    }

    /// Returns `true` for the terminal stage.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for CustodyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CustodyStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for CustodyStatus {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for CustodyStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl Serialize for CustodyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CustodyStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_known_stages() {
        assert_eq!(CustodyStatus::parse("Produced"), CustodyStatus::Produced);
        assert_eq!(CustodyStatus::parse("shipped"), CustodyStatus::Shipped);
        assert_eq!(CustodyStatus::parse("DELIVERED"), CustodyStatus::Delivered);
    }

    #[test]
    fn in_transit_spellings_fold_together() {
        for text in ["In Transit", "in-transit", "InTransit", " in_transit "] {
            assert_eq!(CustodyStatus::parse(text), CustodyStatus::InTransit, "{text}");
        }
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let status = CustodyStatus::parse("  Quarantined at port ");
        assert_eq!(status, CustodyStatus::Other("Quarantined at port".into()));
        assert_eq!(status.label(), "Quarantined at port");
    }

    #[test]
    fn label_is_canonical() {
        assert_eq!(CustodyStatus::parse("in transit").label(), "InTransit");
        assert_eq!(CustodyStatus::Delivered.to_string(), "Delivered");
        assert!(CustodyStatus::Delivered.is_delivered());
        assert!(!CustodyStatus::Shipped.is_delivered());
    }

    #[test]
    fn canonical_forms() {
        assert!(CustodyStatus::InTransit.is_canonical());
        assert!(CustodyStatus::parse(" Recalled ").is_canonical());
        assert!(!CustodyStatus::Other("delivered".into()).is_canonical());
        assert!(!CustodyStatus::Other("Recalled ".into()).is_canonical());
    }

    #[test]
    fn from_str_never_fails() {
        let status: CustodyStatus = "Recalled".parse().unwrap();
        assert_eq!(status, CustodyStatus::Other("Recalled".into()));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&CustodyStatus::InTransit).unwrap();
        assert_eq!(json, "\"InTransit\"");
        let parsed: CustodyStatus = serde_json::from_str("\"in transit\"").unwrap();
        assert_eq!(parsed, CustodyStatus::InTransit);
    }
}
