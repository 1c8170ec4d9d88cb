//! Persistence.
//!
//! Stores only sealed values: wrapped master keys, sealed record fields,
//! per-owner wrapped record keys and share tokens. Nothing here ever sees a
//! password, master key, record key or share secret.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait (`load` and `save` at minimum)
//! 2. Override `transact` to hold an exclusive lock across the update if
//!    more than one writer can reach the backing storage
//! 3. Re-export from this module

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Owner, RecordKind};
use crate::core::share::PendingShare;
use crate::core::types::{RecordId, Sealed, ShareId, Username};
use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Everything the vault persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultData {
    #[serde(default)]
    pub users: BTreeMap<Username, UserEntry>,
    #[serde(default)]
    pub records: BTreeMap<RecordId, StoredRecord>,
    #[serde(default)]
    pub shares: BTreeMap<ShareId, PendingShare>,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Master key sealed under the login password.
    pub wrapped_master_key: Sealed,
    /// User id sealed under the login password.
    pub wrapped_uid: Sealed,
    pub created_at: DateTime<Utc>,
}

/// A record and everyone who can open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub kind: RecordKind,
    pub name: String,
    /// Fields sealed under the record key, in `kind.field_names()` order.
    pub fields: Vec<Sealed>,
    pub owners: Vec<Owner>,
}

impl StoredRecord {
    pub fn owner(&self, username: &str) -> Option<&Owner> {
        self.owners.iter().find(|o| o.username == username)
    }
}

/// Persistence backend.
pub trait Store {
    /// Read the current state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read or parsed.
    fn load(&self) -> Result<VaultData>;

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the state cannot be written.
    fn save(&self, data: &VaultData) -> Result<()>;

    /// Apply `f` to the current state and commit only if it succeeds.
    ///
    /// An `Err` from `f` leaves the stored state untouched. Transactions on
    /// the same backing storage are serializable: no other `transact` may
    /// load or commit between this one's load and its commit. The default
    /// body takes no lock and is only correct for single-writer backends;
    /// shared backends must override it.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut VaultData) -> Result<T>,
    {
        let mut data = self.load()?;
        let out = f(&mut data)?;
        self.save(&data)?;
        Ok(out)
    }
}
