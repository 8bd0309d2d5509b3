//! Vault session layer.
//!
//! A [`VaultSession`] is the explicit handle that owns the derived master
//! key for the lifetime of an unlocked vault. The crypto core underneath
//! stays stateless; callers pass the session to each seal/open call and
//! drop it to lock, which zeroizes the key on every exit path.
//!
//! This crate holds no persistence. Callers store the
//! [`VerificationRecord`] produced at creation time and the sealed record
//! strings returned by [`VaultSession::seal_record`], and load them back
//! verbatim.
//!
//! Unlock works by re-deriving the key from the entered password and the
//! stored salt, then decrypting the verification envelope. A wrong
//! password and a tampered envelope are indistinguishable here by design:
//! both surface as [`SessionError::IncorrectPassword`].

use lockstash_crypto::{
    decrypt_from_string, derive_key, encrypt_to_string, CryptoError, MasterKey, Salt,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Known plaintext encrypted at vault creation and checked on unlock.
const VERIFICATION_MARKER: &[u8] = b"VERIFIED";

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The entered password did not unlock the vault. Also covers a
    /// tampered verification envelope; the caller must not be able to
    /// tell the two apart.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A stored record failed authentication: corrupted data or a key
    /// from a different vault/password generation.
    #[error("record corrupted or wrong key")]
    RecordUnreadable,

    /// A stored record string does not parse as an envelope at all.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The KDF could not run (e.g. memory cost could not be allocated).
    /// Distinct from a wrong password and never retried with weaker
    /// parameters.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// Unexpected failure inside the crypto core.
    #[error("crypto failure: {0}")]
    Crypto(String),
}

/// Salt plus verification envelope, persisted once per vault.
///
/// The envelope is the serialized encryption of [`VERIFICATION_MARKER`]
/// under the vault key. Decrypting it proves a candidate password is
/// correct without storing any password-derived material.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub salt: Salt,
    pub envelope: String,
}

/// Handle owning the master key of one unlocked vault.
///
/// Dropping the session locks the vault: the key is zeroized on drop.
#[derive(Debug)]
pub struct VaultSession {
    key: MasterKey,
}

impl VaultSession {
    /// Initializes a new vault from a password.
    ///
    /// Generates a fresh salt, derives the master key, and encrypts the
    /// verification marker. The caller persists the returned
    /// [`VerificationRecord`]; the session is already unlocked.
    ///
    /// Blocking: runs the full KDF cost. Call from a worker thread.
    pub fn create(password: &str) -> SessionResult<(Self, VerificationRecord)> {
        let salt = Salt::random();
        let key = derive_key(password, &salt).map_err(derivation_error)?;

        let envelope = encrypt_to_string(&key, VERIFICATION_MARKER)
            .map_err(|e| SessionError::Crypto(e.to_string()))?;

        debug!("vault initialized");
        Ok((Self { key }, VerificationRecord { salt, envelope }))
    }

    /// Unlocks a vault by verifying a password against its stored record.
    ///
    /// Succeeds only if the re-derived key decrypts the verification
    /// envelope to the exact marker bytes. Every verification failure —
    /// wrong password, tampered or malformed envelope, wrong recovered
    /// bytes — is [`SessionError::IncorrectPassword`].
    ///
    /// Blocking: runs the full KDF cost. Call from a worker thread.
    pub fn unlock(password: &str, record: &VerificationRecord) -> SessionResult<Self> {
        let key = derive_key(password, &record.salt).map_err(derivation_error)?;

        let recovered = decrypt_from_string(&key, &record.envelope)
            .map_err(|_| SessionError::IncorrectPassword)?;
        if recovered != VERIFICATION_MARKER {
            return Err(SessionError::IncorrectPassword);
        }

        debug!("vault unlocked");
        Ok(Self { key })
    }

    /// Encrypts a record field for storage, returning the envelope string.
    pub fn seal_record(&self, plaintext: &[u8]) -> SessionResult<String> {
        encrypt_to_string(&self.key, plaintext).map_err(|e| SessionError::Crypto(e.to_string()))
    }

    /// Decrypts a stored record field.
    pub fn open_record(&self, stored: &str) -> SessionResult<Vec<u8>> {
        decrypt_from_string(&self.key, stored).map_err(|e| match e {
            CryptoError::Authentication => SessionError::RecordUnreadable,
            CryptoError::MalformedEnvelope(msg) => SessionError::MalformedRecord(msg),
            other => SessionError::Crypto(other.to_string()),
        })
    }

    /// Locks the vault. The key is zeroized as the session drops.
    ///
    /// Equivalent to dropping the session; exists so call sites can state
    /// intent explicitly.
    pub fn lock(self) {
        debug!("vault locked");
    }
}

fn derivation_error(e: CryptoError) -> SessionError {
    match e {
        CryptoError::Derivation(msg) => SessionError::Derivation(msg),
        other => SessionError::Crypto(other.to_string()),
    }
}
