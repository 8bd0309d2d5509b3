//! Master key derivation and password verification.
//!
//! Argon2id v1.3 with fixed parameters: 64 MiB memory, 3 iterations,
//! 4 lanes, 32-byte output. The parameters are constants rather than
//! caller inputs so a compromised caller cannot downgrade them; changing
//! them invalidates no stored envelope, only derived keys.

use crate::error::{CryptoError, CryptoResult};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Salt length in bytes.
pub const SALT_SIZE: usize = 32;

/// Derived key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

// Argon2id cost parameters. Tuned so one derivation costs hundreds of
// milliseconds to a few seconds on commodity hardware.
const KDF_M_COST_KIB: u32 = 65536;
const KDF_T_COST: u32 = 3;
const KDF_P_COST: u32 = 4;

fn fill_random(buf: &mut [u8]) {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .expect("OS entropy source unavailable");
}

/// Per-vault random salt. Not secret; stored alongside the vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh salt from the OS CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        fill_random(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// 256-bit symmetric key derived from the master password.
///
/// Never persisted. Zeroized on drop; equality comparison is constant
/// time. `Debug` is redacted so the key cannot leak through logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Reconstructs a key from a byte slice, e.g. out of OS secure storage.
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for MasterKey {}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Derives the master key from a password and salt using Argon2id.
///
/// Deterministic: the same (password, salt) pair always yields the same
/// key. Blocking and expensive by design — run it on a worker thread,
/// never on a latency-sensitive one. A resource failure (the memory cost
/// could not be allocated) surfaces as [`CryptoError::Derivation`].
pub fn derive_key(password: &str, salt: &Salt) -> CryptoResult<MasterKey> {
    let params = Params::new(KDF_M_COST_KIB, KDF_T_COST, KDF_P_COST, Some(KEY_SIZE))
        .map_err(|e| CryptoError::Derivation(format!("invalid KDF parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut output)
        .map_err(|e| CryptoError::Derivation(format!("argon2 failure: {e}")))?;

    let key = MasterKey::from_bytes(output);
    output.zeroize();
    Ok(key)
}

/// Verifies a password against a previously derived key.
///
/// Derives a candidate key and compares in constant time. A wrong
/// password is `Ok(false)`, never an error; only a KDF resource failure
/// returns `Err`.
pub fn verify_password(password: &str, salt: &Salt, expected: &MasterKey) -> CryptoResult<bool> {
    let derived = derive_key(password, salt)?;
    Ok(derived == *expected)
}

/// Generates a random 256-bit key directly from the OS CSPRNG.
///
/// For keys that are not password-derived (and for tests, where running
/// the full KDF would be wasteful).
pub fn generate_random_key() -> MasterKey {
    let mut bytes = [0u8; KEY_SIZE];
    fill_random(&mut bytes);
    let key = MasterKey::from_bytes(bytes);
    bytes.zeroize();
    key
}
