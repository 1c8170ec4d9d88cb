//! In-memory store.

use std::sync::{Mutex, MutexGuard};

use super::{Store, VaultData};
use crate::error::Result;

/// Process-local store, mainly for tests and embedding.
///
/// `transact` holds the lock for the whole update, so concurrent callers
/// never interleave inside one transaction.
#[derive(Debug, Default)]
pub struct Memory {
    data: Mutex<VaultData>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VaultData> {
        // A panic mid-transaction never reaches the guarded data: updates
        // run on a copy that is only swapped in on success.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for Memory {
    fn load(&self) -> Result<VaultData> {
        Ok(self.lock().clone())
    }

    fn save(&self, data: &VaultData) -> Result<()> {
        *self.lock() = data.clone();
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut VaultData) -> Result<T>,
    {
        let mut guard = self.lock();
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }
}
