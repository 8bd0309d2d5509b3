//! Cryptographic core for Lockstash.
//!
//! Provides the two primitives everything else is built on:
//! - Argon2id key derivation from the master password
//! - AES-256-GCM authenticated encryption with secure key zeroization
//!
//! # Architecture
//!
//! The master key is derived from the user's password and a per-vault
//! salt. It is never stored — it exists in memory only while a vault is
//! unlocked, and the surrounding session layer owns its lifetime.
//!
//! Every encrypted value at rest is a self-contained [`Envelope`]
//! (nonce + tag + ciphertext). Envelopes serialize to a colon-joined
//! base64 string that storage layers treat as opaque:
//!
//! ```text
//! base64(nonce):base64(tag):base64(ciphertext)
//! ```
//!
//! All functions here are pure and stateless; any number of derive,
//! encrypt, and decrypt calls may run concurrently without coordination.

mod cipher;
mod envelope;
mod error;
mod key;

pub use cipher::{decrypt, encrypt, Envelope, NONCE_SIZE, TAG_SIZE};
pub use envelope::{decrypt_from_string, encrypt_to_string};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, generate_random_key, verify_password, MasterKey, Salt, KEY_SIZE, SALT_SIZE};
