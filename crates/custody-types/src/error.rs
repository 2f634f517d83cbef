use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    #[error("field `{field}` has leading or trailing whitespace")]
    UntrimmedField { field: &'static str },

    #[error("status label `{label}` is not in canonical form")]
    NonCanonicalStatus { label: String },

    #[error("field `{field}` is {len} bytes, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}
