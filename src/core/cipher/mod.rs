//! Cryptographic operations.
//!
//! Layered leaves-first:
//!
//! - **kdf**: PBKDF2-HMAC-SHA256 password stretching.
//! - **aead**: AES-256-GCM authenticated encryption behind the [`Cipher`] trait.
//! - **envelope**: the `salt || iv || ciphertext` sealed value built on both.
//!
//! Everything here is a pure transform over explicit inputs. Randomness is a
//! parameter in the `*_with` variants so tests can substitute a seeded RNG;
//! the plain variants draw from the OS.

use zeroize::Zeroizing;

use crate::core::constants::IV_LEN;
use crate::error::Result;

mod aead;
mod envelope;
mod kdf;

pub use aead::{decrypt, encrypt, AesGcm, Encrypted};
pub use envelope::{open, open_all, seal, seal_all, seal_all_with, SecretEnvelope};
pub use kdf::{derive_key, DerivedKey, Purpose};

/// Symmetric authenticated cipher.
///
/// Implementations must append the authentication tag to the ciphertext and
/// fail decryption with `CipherError::Authentication` when it does not
/// verify, never returning unauthenticated bytes.
pub trait Cipher {
    /// Encrypt `plaintext` under `key` with the given nonce.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyUsage` if `key` was not derived for encryption.
    fn encrypt(&self, iv: &[u8; IV_LEN], plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>>;

    /// Decrypt and verify `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` if the tag does not verify.
    fn decrypt(
        &self,
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
        key: &DerivedKey,
    ) -> Result<Zeroizing<Vec<u8>>>;

    /// Algorithm name for display.
    fn name(&self) -> &'static str;
}
