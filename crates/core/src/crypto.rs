//! AES-256-GCM encryption of record content.
//!
//! A thin wrapper over the `aes-gcm` AEAD: the interesting part of the
//! system is how the per-session key reaches this module (see the auth
//! subsystem), not the cipher usage itself. Ciphertexts are
//! `base64(nonce || ciphertext+tag)` with a fresh random 96-bit nonce per
//! encryption.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blake2b_simd::Params;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("encryption failed")]
    Encrypt,

    /// Wrong key, truncated input, or tampered ciphertext. AEAD does not
    /// distinguish these cases and neither do we.
    #[error("decryption failed")]
    Decrypt,

    #[error("malformed ciphertext")]
    Malformed,
}

/// Symmetric encryptor bound to the process-wide secret.
///
/// The effective cipher key mixes the caller-supplied key (the per-session
/// derived key from the access cache) with the process secret, so a leaked
/// cache descriptor alone cannot decrypt stored content.
#[derive(Clone)]
pub struct Encryptor {
    secret: String,
}

impl Encryptor {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Encrypt `plaintext` under the mixed key. Output is base64.
    pub fn encrypt_text(&self, plaintext: &str, key: &str) -> Result<String, CryptoError> {
        let cipher = self.cipher(key);
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(raw))
    }

    /// Decrypt a value previously produced by [`Self::encrypt_text`].
    pub fn decrypt_text(&self, encoded: &str, key: &str) -> Result<String, CryptoError> {
        let raw = BASE64.decode(encoded).map_err(|_| CryptoError::Malformed)?;
        if raw.len() <= NONCE_LEN {
            return Err(CryptoError::Malformed);
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);

        let plaintext = self
            .cipher(key)
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::Decrypt)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::Malformed)
    }

    fn cipher(&self, key: &str) -> Aes256Gcm {
        let digest = Params::new()
            .hash_length(32)
            .hash(format!("{key}{}", self.secret).as_bytes());
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(digest.as_bytes()))
    }
}
