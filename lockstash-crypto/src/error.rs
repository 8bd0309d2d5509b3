//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in key derivation, encryption, and envelope parsing.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The KDF could not run, e.g. its memory cost could not be allocated.
    /// Never retried with weaker parameters.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// The AEAD cipher rejected the encrypt input (plaintext beyond the
    /// GCM length limit).
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Tag verification failed on decrypt. Covers both a wrong key and
    /// tampered nonce/tag/ciphertext; the two cases are deliberately not
    /// distinguished.
    #[error("decryption failed (wrong key or tampered data)")]
    Authentication,

    /// A serialized envelope string does not parse into three base64
    /// segments with a 12-byte nonce and a 16-byte tag.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
