use serde::{Deserialize, Serialize};

/// How [`Ledger::update_status`](crate::Ledger::update_status) records a
/// status change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Append a new entry carrying the new status. Earlier entries are never
    /// touched, so the chain stays valid and the full custody trail is kept.
    #[default]
    AppendTransition,
    /// Overwrite the first matching entry's status and recompute only that
    /// entry's commitment. A successor's stored link then no longer matches,
    /// which `verify()` reports as a linkage failure.
    RewriteInPlace,
}

impl UpdatePolicy {
    /// Returns `true` if updates only ever grow the ledger.
    pub fn is_append_only(&self) -> bool {
        matches!(self, Self::AppendTransition)
    }
}

/// Configuration for a [`Ledger`](crate::Ledger).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Strategy used by `update_status`.
    pub update_policy: UpdatePolicy,
}

impl LedgerConfig {
    /// Configuration reproducing in-place status rewrites.
    pub fn rewrite_in_place() -> Self {
        Self {
            update_policy: UpdatePolicy::RewriteInPlace,
        }
    }
}
