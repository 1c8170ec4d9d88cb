//! AES-256-GCM backend.
//!
//! 96-bit nonce per call, 128-bit tag appended to the ciphertext (standard
//! AEAD layout, matches WebCrypto's `AES-GCM` output).

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::Zeroizing;

use super::kdf::{DerivedKey, Purpose};
use super::Cipher;
use crate::core::constants::IV_LEN;
use crate::error::{CipherError, Result};

/// AES-256-GCM cipher.
pub struct AesGcm;

/// Output of a single encryption: the nonce and ciphertext-with-tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Cipher for AesGcm {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn encrypt(&self, iv: &[u8; IV_LEN], plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>> {
        key.require(Purpose::Encrypt)?;
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted");
        Ok(ciphertext)
    }

    fn decrypt(
        &self,
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
        key: &DerivedKey,
    ) -> Result<Zeroizing<Vec<u8>>> {
        key.require(Purpose::Decrypt)?;
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        // aes-gcm reports every verification failure as an opaque error.
        let plaintext = cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| CipherError::Authentication)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(plaintext))
    }
}

/// Encrypt under a fresh random nonce.
pub fn encrypt<R: RngCore + CryptoRng>(
    rng: &mut R,
    plaintext: &[u8],
    key: &DerivedKey,
) -> Result<Encrypted> {
    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);
    let ciphertext = AesGcm.encrypt(&iv, plaintext, key)?;
    Ok(Encrypted { iv, ciphertext })
}

/// Decrypt and verify; fails with `CipherError::Authentication` on tag mismatch.
pub fn decrypt(iv: &[u8; IV_LEN], ciphertext: &[u8], key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    AesGcm.decrypt(iv, ciphertext, key)
}
