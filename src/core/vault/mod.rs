//! The primary interface for hexagon operations.
//!
//! Vault wraps a [`Store`] and runs every multi-step flow (sign-up, password
//! change, record CRUD, sharing, revocation) as a single store transaction,
//! so a failure at any step commits nothing.

mod records;
mod shares;
mod users;

use std::fmt;

use crate::core::domain::MasterKey;
use crate::core::store::{Store, StoredRecord, VaultData};
use crate::core::types::Username;
use crate::error::{Result, ShareError, StoreError, ValidationError};

pub use records::{RecordSummary, RevealedRecord};

/// An unlocked user.
///
/// Produced by [`Vault::login`]; holds the master key for as long as the
/// caller keeps it and zeroizes it on drop.
pub struct Session {
    username: Username,
    uid: String,
    master: MasterKey,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub(crate) fn master(&self) -> &MasterKey {
        &self.master
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// The primary interface for hexagon operations.
#[derive(Debug)]
pub struct Vault<S: Store> {
    store: S,
}

impl<S: Store> Vault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// Private helpers shared across modules

/// Usernames are email addresses: something before and after a single `@`,
/// and a dot in the domain.
pub(super) fn validate_email(value: &str) -> Result<()> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidReceiver(value.to_string()).into());
    }
    Ok(())
}

/// Look up a record the session user owns.
///
/// # Errors
///
/// `StoreError::RecordNotFound` if missing, `ShareError::Unauthorized` if the
/// user is not an owner.
pub(super) fn owned_record<'a>(
    data: &'a VaultData,
    session: &Session,
    record_id: &str,
) -> Result<&'a StoredRecord> {
    let record = data
        .records
        .get(record_id)
        .ok_or_else(|| StoreError::RecordNotFound(record_id.to_string()))?;
    if record.owner(session.username()).is_none() {
        return Err(ShareError::Unauthorized.into());
    }
    Ok(record)
}

/// Mutable variant of [`owned_record`].
pub(super) fn owned_record_mut<'a>(
    data: &'a mut VaultData,
    session: &Session,
    record_id: &str,
) -> Result<&'a mut StoredRecord> {
    let record = data
        .records
        .get_mut(record_id)
        .ok_or_else(|| StoreError::RecordNotFound(record_id.to_string()))?;
    if record.owner(session.username()).is_none() {
        return Err(ShareError::Unauthorized.into());
    }
    Ok(record)
}
