//! BLAKE2b credential hashing.
//!
//! The digest layout here is a compatibility surface: stored password and
//! fingerprint hashes were produced with exactly this construction, so the
//! parameters (digest sizes, password-derived salt) must not change without
//! a versioned migration of every stored hash.
//!
//! Note the salt for [`hash_password`] is derived from the password itself
//! rather than drawn from a CSPRNG. That keeps verification stateless (no
//! salt column) at the cost of rainbow-table resistance across users with
//! related passwords. Flagged in DESIGN.md; do not "fix" silently.

use blake2b_simd::Params;

/// Digest size (bytes) for stored password and fingerprint hashes.
const PASSWORD_DIGEST_SIZE: usize = 64;

/// Digest size (bytes) for the salt derived from the password itself.
const SALT_DIGEST_SIZE: usize = 8;

/// Digest size (bytes) for the per-session record-encryption key.
const ENCRYPTION_KEY_DIGEST_SIZE: usize = 32;

/// Number of trailing password-hash characters fed into key derivation.
const ENCRYPTION_KEY_SOURCE_LEN: usize = 32;

/// BLAKE2b hex digest of `text` with the given digest size and salt.
///
/// An empty salt is equivalent to no salt (BLAKE2b zero-pads the salt
/// parameter to 16 bytes either way). Salts longer than 16 bytes are not
/// produced anywhere in this crate.
pub fn hash_text(text: &str, digest_size: usize, salt: &str) -> String {
    let mut params = Params::new();
    params.hash_length(digest_size);
    if !salt.is_empty() {
        params.salt(salt.as_bytes());
    }
    params.hash(text.as_bytes()).to_hex().to_string()
}

/// Hash a password with a salt derived from the password's own
/// every-other-character subsequence.
///
/// Deterministic: the same password always yields the same digest, so a
/// supplied password can be compared directly against the stored hash.
pub fn hash_password(password: &str) -> String {
    let skipped: String = password.chars().step_by(2).collect();
    let salt = hash_text(&skipped, SALT_DIGEST_SIZE, "");
    hash_text(password, PASSWORD_DIGEST_SIZE, &salt)
}

/// Hash a client-supplied device fingerprint for storage/comparison.
///
/// Same construction as [`hash_password`]; fingerprints are compared, never
/// recovered.
pub fn hash_fingerprint(fingerprint: &str) -> String {
    hash_password(fingerprint)
}

/// Derive the record-encryption key cached alongside an access token.
///
/// The key is a 32-byte digest of the last 32 characters of the stored
/// password hash, which ties decryption capability to the current password:
/// a password change silently invalidates every previously cached key and
/// forces re-login.
pub fn derive_encryption_key(password_hash: &str) -> String {
    let tail_start = password_hash.len().saturating_sub(ENCRYPTION_KEY_SOURCE_LEN);
    hash_text(&password_hash[tail_start..], ENCRYPTION_KEY_DIGEST_SIZE, "")
}
