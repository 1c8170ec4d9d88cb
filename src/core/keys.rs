//! Record key wrapping.
//!
//! A record key is stored sealed under each owner's master key; a master key
//! is stored sealed under its user's login password. Both layers are plain
//! envelopes, so wrapping is [`seal`] with the outer secret as password.

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::{open, seal};
use crate::core::domain::{MasterKey, RecordKey};
use crate::core::types::Sealed;
use crate::error::Result;

/// Wrap an arbitrary value under a master key.
pub fn wrap(value: &str, master: &MasterKey) -> Result<Sealed> {
    seal(value, master.expose())
}

/// Inverse of [`wrap`].
///
/// # Errors
///
/// Returns `CipherError::Authentication` if `master` is not the key the value
/// was wrapped under.
pub fn unwrap(wrapped: &str, master: &MasterKey) -> Result<Zeroizing<String>> {
    open(wrapped, master.expose())
}

/// Wrap a record key under its owner's master key.
pub fn wrap_record_key(key: &RecordKey, master: &MasterKey) -> Result<Sealed> {
    wrap(key.expose(), master)
}

/// Recover a record key from an owner's wrapped copy.
pub fn unwrap_record_key(wrapped: &str, master: &MasterKey) -> Result<RecordKey> {
    Ok(RecordKey::from(unwrap(wrapped, master)?.as_str()))
}

/// Unwrap under `old` and seal under `new`. The plaintext never leaves this call.
pub fn rewrap(wrapped: &str, old: &str, new: &str) -> Result<Sealed> {
    let value = open(wrapped, old)?;
    seal(&value, new)
}

/// Re-wrap every value, all or nothing.
///
/// Either every value is re-sealed and returned in order, or the first
/// failure is returned and nothing is. Callers persist the result in a
/// single write.
pub fn rewrap_all<S: AsRef<str>>(wrapped: &[S], old: &str, new: &str) -> Result<Vec<Sealed>> {
    debug!(count = wrapped.len(), "re-wrapping keys");
    wrapped
        .iter()
        .map(|w| rewrap(w.as_ref(), old, new))
        .collect()
}

/// Generate a new master key and seal it under the login password.
///
/// Returns the key for the current session and its sealed form for storage.
pub fn create_master_key(password: &str) -> Result<(MasterKey, Sealed)> {
    let master = MasterKey::generate();
    let wrapped = seal(master.expose(), password)?;
    Ok((master, wrapped))
}

/// Open a sealed master key with the login password.
///
/// A wrong password fails AEAD verification, so this doubles as the
/// password check.
pub fn unlock_master_key(wrapped: &str, password: &str) -> Result<MasterKey> {
    Ok(MasterKey::from(open(wrapped, password)?.as_str()))
}
