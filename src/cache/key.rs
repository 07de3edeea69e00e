//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Derive the cache key for a listing URL.
///
/// SHA-256 over the raw URL bytes, rendered as 64 lowercase hex characters.
/// The URL string is hashed as given: no normalization of trailing slashes,
/// query order, or case, so two cosmetically different spellings of the same
/// directory cache separately. Documented limitation, not worth the
/// normalization edge cases.
pub fn derive_key(url: &str) -> String {
    let hash = Sha256::digest(url.as_bytes());
    hex::encode(hash)
}
