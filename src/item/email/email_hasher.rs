use sha2::{Digest, Sha256};

/// Trims surrounding whitespace and lowercases every character.
///
/// Lowercasing follows Unicode's locale-independent mapping, so the result is
/// the same on every platform.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// SHA-256 digest of `normalized`, as 64 lowercase hexadecimal characters.
pub fn sha256_hex(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

/// Normalizes then hashes a raw email value.
///
/// ```
/// use csv_email_hash::item::email::email_hasher::hash_email;
///
/// assert_eq!(hash_email(" A@B.com "), hash_email("a@b.com"));
/// assert_eq!(hash_email("").len(), 64);
/// ```
pub fn hash_email(raw: &str) -> String {
    sha256_hex(&normalize_email(raw))
}
