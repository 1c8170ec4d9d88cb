//! Sealed secret envelope.
//!
//! Wire format, bit-compatible across clients:
//!
//! ```text
//! base64( salt[16] || iv[12] || ciphertext_with_tag[N] )
//! ```
//!
//! The key is re-derived from the password and the embedded salt, so an
//! envelope carries everything needed to open it except the password.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::aead::{self, AesGcm};
use super::kdf::{derive_key, Purpose};
use super::Cipher;
use crate::core::constants::{HEADER_LEN, IV_LEN, SALT_LEN, TAG_LEN};
use crate::error::{CipherError, Error, Result};

/// A value sealed under a password.
///
/// Salt and iv are fresh per seal, so sealing the same plaintext twice under
/// the same password never yields the same envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretEnvelope {
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl SecretEnvelope {
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// Ciphertext with the 16-byte tag appended.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Raw `salt || iv || ciphertext` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.iv);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Split raw bytes into salt, iv and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Decode` for anything shorter than 44 bytes: the
    /// 28-byte salt and iv header plus the 16-byte tag. A 28 to 43 byte
    /// buffer has no room for a tag and is rejected here rather than reaching
    /// AEAD and failing as `Authentication`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN + TAG_LEN {
            return Err(CipherError::Decode(format!(
                "envelope is {} bytes, need at least {}",
                bytes.len(),
                HEADER_LEN + TAG_LEN
            ))
            .into());
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        let mut envelope = Self {
            salt: [0u8; SALT_LEN],
            iv: [0u8; IV_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.iv.copy_from_slice(iv);
        Ok(envelope)
    }

    /// Base64 wire form.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse the base64 wire form.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Decode` on invalid base64 or a buffer shorter
    /// than 44 bytes (see [`SecretEnvelope::from_bytes`]).
    pub fn decode(sealed: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(sealed.trim())
            .map_err(|e| CipherError::Decode(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Seal `plaintext` under `password` using the given random source.
    ///
    /// Salt and iv are drawn before the key is derived; the derivation is
    /// the slow step.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyDerivation` if the password is empty.
    pub fn seal_with<R: RngCore + CryptoRng>(
        rng: &mut R,
        plaintext: &str,
        password: &str,
    ) -> Result<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut iv);

        let key = derive_key(password, &salt, Purpose::Encrypt)?;
        let ciphertext = AesGcm.encrypt(&iv, plaintext.as_bytes(), &key)?;

        Ok(Self {
            salt,
            iv,
            ciphertext,
        })
    }

    /// Open the envelope with `password`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` on a wrong password or tampered
    /// data, and `CipherError::Decode` if the plaintext is not UTF-8.
    pub fn open(&self, password: &str) -> Result<Zeroizing<String>> {
        let key = derive_key(password, &self.salt, Purpose::Decrypt)?;
        let plaintext = aead::decrypt(&self.iv, &self.ciphertext, &key)?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| CipherError::Decode(format!("plaintext is not UTF-8: {}", e)))?;
        Ok(Zeroizing::new(text.to_string()))
    }
}

impl fmt::Display for SecretEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for SecretEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretEnvelope")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

impl FromStr for SecretEnvelope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<String> for SecretEnvelope {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::decode(&value)
    }
}

impl From<SecretEnvelope> for String {
    fn from(envelope: SecretEnvelope) -> Self {
        envelope.encode()
    }
}

/// Seal `plaintext` under `password`, returning the base64 wire form.
///
/// # Errors
///
/// Returns `CipherError::KeyDerivation` if the password is empty.
pub fn seal(plaintext: &str, password: &str) -> Result<String> {
    Ok(SecretEnvelope::seal_with(&mut OsRng, plaintext, password)?.encode())
}

/// Open a base64 envelope with `password`.
///
/// # Errors
///
/// Returns `CipherError::Decode` on malformed input and
/// `CipherError::Authentication` on a wrong password or tampering.
pub fn open(sealed: &str, password: &str) -> Result<Zeroizing<String>> {
    SecretEnvelope::decode(sealed)?.open(password)
}

/// Seal every plaintext under one password, preserving order.
///
/// Fails as a whole if any element fails.
pub fn seal_all<S: AsRef<str>>(plaintexts: &[S], password: &str) -> Result<Vec<String>> {
    seal_all_with(&mut OsRng, plaintexts, password)
}

/// [`seal_all`] with an explicit random source.
pub fn seal_all_with<R: RngCore + CryptoRng, S: AsRef<str>>(
    rng: &mut R,
    plaintexts: &[S],
    password: &str,
) -> Result<Vec<String>> {
    debug!(count = plaintexts.len(), "sealing batch");
    plaintexts
        .iter()
        .map(|p| SecretEnvelope::seal_with(&mut *rng, p.as_ref(), password).map(|e| e.encode()))
        .collect()
}

/// Open every envelope under one password, preserving order.
///
/// Fails as a whole if any element fails; no partial results are returned.
pub fn open_all<S: AsRef<str>>(sealed: &[S], password: &str) -> Result<Vec<Zeroizing<String>>> {
    debug!(count = sealed.len(), "opening batch");
    sealed.iter().map(|s| open(s.as_ref(), password)).collect()
}
