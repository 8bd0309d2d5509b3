//! AES-256-GCM authenticated encryption.
//!
//! Every encrypt call draws a fresh 12-byte nonce from the OS CSPRNG.
//! A (key, nonce) pair must never repeat; random nonces per call under
//! short-lived vault keys keep collision probability negligible.

use crate::error::{CryptoError, CryptoResult};
use crate::key::MasterKey;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::TryRngCore;
use serde::{Deserialize, Serialize};

/// GCM nonce length in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag length in bytes (128 bits, never truncated).
pub const TAG_SIZE: usize = 16;

/// One encrypted payload at rest: nonce, tag, and ciphertext.
///
/// Ciphertext length equals plaintext length — GCM is a stream mode, so
/// there is no padding. The string form is produced by
/// [`Envelope::encode`] and consumed by [`Envelope::decode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub nonce: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Encrypts a payload under the given key with a fresh random nonce.
///
/// Accepts any plaintext, including empty. Fails only if the plaintext
/// exceeds the GCM length limit.
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> CryptoResult<Envelope> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng
        .try_fill_bytes(&mut nonce)
        .expect("OS entropy source unavailable");

    // The aead API returns ciphertext with the tag appended; the envelope
    // stores them as separate fields.
    let mut combined = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Encryption("plaintext exceeds AES-GCM length limit".into()))?;

    let split = combined.len() - TAG_SIZE;
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&combined[split..]);
    combined.truncate(split);

    Ok(Envelope {
        nonce,
        tag,
        ciphertext: combined,
    })
}

/// Decrypts an envelope, verifying its authentication tag.
///
/// Returns [`CryptoError::Authentication`] if the key is wrong or any
/// byte of nonce, tag, or ciphertext was altered. The error carries no
/// detail about which check failed.
pub fn decrypt(key: &MasterKey, envelope: &Envelope) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let mut combined = Vec::with_capacity(envelope.ciphertext.len() + TAG_SIZE);
    combined.extend_from_slice(&envelope.ciphertext);
    combined.extend_from_slice(&envelope.tag);

    cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), combined.as_slice())
        .map_err(|_| CryptoError::Authentication)
}
