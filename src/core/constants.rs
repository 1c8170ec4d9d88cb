//! Constants used throughout hexagon.
//!
//! Wire-format sizes and KDF parameters are protocol constants: two
//! independent clients only interoperate if these match exactly.

/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes (96 bits).
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Length of the `salt || iv` envelope header.
pub const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 250_000;

/// Random bytes behind a generated secret (master key, record key, share secret).
pub const SECRET_BYTES: usize = 32;

/// Default share landing page; `shareId`, `shareKey` and `next` are appended.
pub const DEFAULT_SHARE_URL: &str = "https://hexagon-web.xyz/app/share";

/// Directory under HOME holding config and store (~/.hexagon).
pub const APP_DIR: &str = ".hexagon";

/// Configuration file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Default store file name inside [`APP_DIR`].
pub const STORE_FILE: &str = "vault.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "HEXAGON_CONFIG";
