use custody_types::Commitment;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g. `"custody-entry-v1"`) that is
/// prepended to every hash computation, so identical bytes hashed under two
/// domains never produce the same digest.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for ledger entry commitments.
    pub const ENTRY: Self = Self::new("custody-entry-v1");

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash a sequence of fields with domain separation.
    ///
    /// Every field is prefixed with its length as a little-endian `u64`, so
    /// moving bytes across a field boundary always changes the digest:
    /// `["AB", "C"]` and `["A", "BC"]` hash differently.
    pub fn hash_fields(&self, fields: &[&[u8]]) -> Commitment {
        let mut hasher = self.start();
        for field in fields {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field);
        }
        Commitment::from_hash(*hasher.finalize().as_bytes())
    }

    fn start(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }
}
