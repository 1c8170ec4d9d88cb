//! Secret string types.
//!
//! Master keys, record keys and share secrets are all random strings used as
//! passwords for [`seal`](crate::core::cipher::seal). Distinct newtypes keep
//! them from being swapped at call sites; all of them zeroize on drop and
//! redact themselves in `Debug`.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::core::constants::SECRET_BYTES;

/// Generate a high-entropy random string.
///
/// 32 random bytes, URL-safe base64 without padding, so the result can be
/// dropped into a link without further escaping.
pub fn generate_plain_secret<R: RngCore + CryptoRng>(rng: &mut R) -> Zeroizing<String> {
    let mut bytes = Zeroizing::new([0u8; SECRET_BYTES]);
    rng.fill_bytes(&mut bytes[..]);
    Zeroizing::new(URL_SAFE_NO_PAD.encode(&bytes[..]))
}

macro_rules! secret_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Zeroizing<String>);

        impl $name {
            /// Generate a fresh secret from the OS random source.
            pub fn generate() -> Self {
                Self::generate_with(&mut OsRng)
            }

            /// Generate a fresh secret from the given random source.
            pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
                Self(generate_plain_secret(rng))
            }

            /// The secret value.
            pub fn expose(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Zeroizing::new(value))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(Zeroizing::new(value.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

secret_string!(
    /// Per-user root secret. Sealed under the login password, never stored in the clear.
    MasterKey
);

secret_string!(
    /// Per-record secret protecting that record's sensitive fields.
    RecordKey
);

secret_string!(
    /// Ephemeral secret that unlocks a single share token. Travels out-of-band only.
    ShareSecret
);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_secret_is_url_safe() {
        let secret = ShareSecret::generate();
        assert_eq!(secret.expose().len(), 43);
        assert!(secret
            .expose()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generate_with_seeded_rng_is_deterministic() {
        let a = RecordKey::generate_with(&mut StdRng::seed_from_u64(7));
        let b = RecordKey::generate_with(&mut StdRng::seed_from_u64(7));
        let c = RecordKey::generate_with(&mut StdRng::seed_from_u64(8));
        assert_eq!(a.expose(), b.expose());
        assert_ne!(a.expose(), c.expose());
    }

    #[test]
    fn test_debug_redacts() {
        let key = MasterKey::from("hunter2");
        let debug = format!("{:?}", key);
        assert_eq!(debug, "MasterKey(<redacted>)");
        assert!(!debug.contains("hunter2"));
    }
}
