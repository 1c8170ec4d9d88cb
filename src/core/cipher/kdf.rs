//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256, 250,000 rounds, 256-bit output. The parameters are
//! fixed so envelopes sealed by one client open in any other.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use crate::error::{CipherError, Result};

/// What a derived key may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Encrypt,
    Decrypt,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }
}

/// A 256-bit AES-GCM key scoped to one [`Purpose`].
///
/// Zeroized on drop; `Debug` never prints the key bytes.
pub struct DerivedKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
    purpose: Purpose,
}

impl DerivedKey {
    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Fail unless this key was derived for `wanted`.
    pub(crate) fn require(&self, wanted: Purpose) -> Result<()> {
        if self.purpose != wanted {
            return Err(CipherError::KeyUsage {
                expected: self.purpose.as_str(),
                actual: wanted.as_str(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("purpose", &self.purpose)
            .finish_non_exhaustive()
    }
}

/// Derive an AES-256 key from a password and a 16-byte salt.
///
/// Deliberately slow (hundreds of milliseconds in release builds); run it off
/// any latency-sensitive path.
///
/// # Errors
///
/// Returns `CipherError::KeyDerivation` if the password is empty or the salt
/// is not exactly 16 bytes.
pub fn derive_key(password: &str, salt: &[u8], purpose: Purpose) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(CipherError::KeyDerivation("password is empty".to_string()).into());
    }
    if salt.len() != SALT_LEN {
        return Err(CipherError::KeyDerivation(format!(
            "salt must be {} bytes, got {}",
            SALT_LEN,
            salt.len()
        ))
        .into());
    }

    trace!(purpose = purpose.as_str(), "deriving key");

    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        &mut bytes[..],
    );

    Ok(DerivedKey { bytes, purpose })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [7u8; SALT_LEN];

    #[test]
    fn test_derive_is_deterministic() {
        let a = derive_key("correct-horse", &SALT, Purpose::Encrypt).unwrap();
        let b = derive_key("correct-horse", &SALT, Purpose::Decrypt).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_salt_changes_key() {
        let a = derive_key("correct-horse", &SALT, Purpose::Encrypt).unwrap();
        let b = derive_key("correct-horse", &[8u8; SALT_LEN], Purpose::Encrypt).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = derive_key("", &SALT, Purpose::Encrypt).unwrap_err();
        assert!(err.is_key_derivation());
    }

    #[test]
    fn test_wrong_salt_length_rejected() {
        let err = derive_key("pw", &[0u8; 8], Purpose::Encrypt).unwrap_err();
        assert!(err.is_key_derivation());
        assert!(err.to_string().contains("16 bytes"));
    }

    #[test]
    fn test_purpose_enforced() {
        let key = derive_key("pw", &SALT, Purpose::Decrypt).unwrap();
        assert!(key.require(Purpose::Decrypt).is_ok());
        assert!(key.require(Purpose::Encrypt).is_err());
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let key = derive_key("pw", &SALT, Purpose::Encrypt).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("Encrypt"));
        assert!(!debug.contains("bytes"));
    }
}
