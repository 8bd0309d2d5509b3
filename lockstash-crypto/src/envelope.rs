//! Transportable string form of an [`Envelope`].
//!
//! Format, bit-exact across implementations:
//!
//! ```text
//! base64(nonce):base64(tag):base64(ciphertext)
//! ```
//!
//! Standard base64 alphabet with padding. `:` never occurs inside a
//! base64 segment, so the split is unambiguous.

use crate::cipher::{decrypt, encrypt, Envelope, NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::MasterKey;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

impl Envelope {
    /// Serializes to the colon-joined base64 string form.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}",
            STANDARD.encode(self.nonce),
            STANDARD.encode(self.tag),
            STANDARD.encode(&self.ciphertext),
        )
    }

    /// Parses the colon-joined base64 string form.
    ///
    /// Rejects anything that is not exactly three decodable segments
    /// carrying a 12-byte nonce and a 16-byte tag.
    pub fn decode(s: &str) -> CryptoResult<Self> {
        let segments: Vec<&str> = s.split(':').collect();
        if segments.len() != 3 {
            return Err(CryptoError::MalformedEnvelope(format!(
                "expected 3 colon-separated segments, got {}",
                segments.len()
            )));
        }

        let nonce_bytes = STANDARD
            .decode(segments[0])
            .map_err(|e| CryptoError::MalformedEnvelope(format!("nonce segment: {e}")))?;
        let tag_bytes = STANDARD
            .decode(segments[1])
            .map_err(|e| CryptoError::MalformedEnvelope(format!("tag segment: {e}")))?;
        let ciphertext = STANDARD
            .decode(segments[2])
            .map_err(|e| CryptoError::MalformedEnvelope(format!("ciphertext segment: {e}")))?;

        if nonce_bytes.len() != NONCE_SIZE {
            return Err(CryptoError::MalformedEnvelope(format!(
                "nonce must be {NONCE_SIZE} bytes, got {}",
                nonce_bytes.len()
            )));
        }
        if tag_bytes.len() != TAG_SIZE {
            return Err(CryptoError::MalformedEnvelope(format!(
                "tag must be {TAG_SIZE} bytes, got {}",
                tag_bytes.len()
            )));
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&nonce_bytes);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&tag_bytes);

        Ok(Self {
            nonce,
            tag,
            ciphertext,
        })
    }
}

/// Encrypts a payload and serializes the envelope in one step.
pub fn encrypt_to_string(key: &MasterKey, plaintext: &[u8]) -> CryptoResult<String> {
    Ok(encrypt(key, plaintext)?.encode())
}

/// Parses a serialized envelope and decrypts it in one step.
pub fn decrypt_from_string(key: &MasterKey, stored: &str) -> CryptoResult<Vec<u8>> {
    decrypt(key, &Envelope::decode(stored)?)
}
