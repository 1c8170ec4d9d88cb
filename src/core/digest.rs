//! Message digests.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `message`.
pub fn digest(message: &str) -> String {
    let hash = Sha256::digest(message.as_bytes());
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}
