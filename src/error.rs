//! Error types.
//!
//! One enum per concern, wrapped by the top-level [`Error`]. Callers that
//! need to map failures onto status codes use the `is_*` predicates rather
//! than matching nested variants.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

impl Error {
    /// AEAD tag mismatch: tampered envelope or wrong password.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Cipher(CipherError::Authentication))
    }

    /// Malformed wire format.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Cipher(CipherError::Decode(_)))
    }

    /// Bad key-derivation input (empty password, wrong salt length).
    pub fn is_key_derivation(&self) -> bool {
        matches!(self, Error::Cipher(CipherError::KeyDerivation(_)))
    }

    /// Identity mismatch or missing ownership.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Share(ShareError::Unauthorized))
    }

    /// Consumed or missing token, record, user or owner.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Share(ShareError::NotFound(_))
                | Error::Store(StoreError::UserNotFound(_))
                | Error::Store(StoreError::RecordNotFound(_))
                | Error::Store(StoreError::OwnerNotFound(_))
        )
    }
}

/// Cryptographic failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    #[error("malformed envelope: {0}")]
    Decode(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("key was derived for {expected} but used to {actual}")]
    KeyUsage {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Share protocol failures.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("share not found: {0}")]
    NotFound(String),
}

/// Persistence failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("user already exists: {0}")]
    UserExists(String),

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("owner not found: {0}")]
    OwnerNotFound(String),

    #[error("failed to read store: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write store: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to lock store: {0}")]
    Lock(#[source] std::io::Error),

    #[error("failed to parse store: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize store: {0}")]
    Serialize(#[source] toml::ser::Error),
}

/// Configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("invalid receiver '{0}': expected an email address")]
    InvalidReceiver(String),

    #[error("invalid share link: {0}")]
    InvalidLink(String),

    #[error("{kind} records take {expected} field(s), got {actual}")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown record kind '{0}' (expected account, seed or note)")]
    InvalidKind(String),
}

pub type Result<T> = std::result::Result<T, Error>;
