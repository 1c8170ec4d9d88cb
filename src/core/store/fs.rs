//! Filesystem-backed store.
//!
//! Keeps the whole vault in one TOML file (`~/.hexagon/vault.toml` by
//! default). Writes go to a sibling temp file that is renamed into place, so
//! a crash mid-write never leaves a half-written vault.
//!
//! `transact` holds an exclusive OS lock on a sibling `<file>.lock` from load
//! to commit. The lock is advisory and covers every process that goes
//! through [`Filesystem::transact`], so two of them finalizing the same share
//! token are serialized and only the first finds the token.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{Store, VaultData};
use crate::error::{Result, StoreError};

/// TOML file store.
#[derive(Debug, Clone)]
pub struct Filesystem {
    path: PathBuf,
}

impl Filesystem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::Write)?;
            }
        }
        Ok(())
    }

    /// Block until this process holds the store lock.
    ///
    /// Released when the returned file is dropped.
    fn lock(&self) -> Result<File> {
        self.ensure_parent()?;
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(StoreError::Lock)?;
        file.lock_exclusive().map_err(StoreError::Lock)?;

        debug!(path = %lock_path.display(), "store lock acquired");
        Ok(file)
    }
}

impl Store for Filesystem {
    fn load(&self) -> Result<VaultData> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store missing, starting empty");
            return Ok(VaultData::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(StoreError::Read)?;
        let data: VaultData = toml::from_str(&contents).map_err(StoreError::Parse)?;

        debug!(
            users = data.users.len(),
            records = data.records.len(),
            shares = data.shares.len(),
            "store loaded"
        );
        Ok(data)
    }

    fn save(&self, data: &VaultData) -> Result<()> {
        let contents = toml::to_string_pretty(data).map_err(StoreError::Serialize)?;
        self.ensure_parent()?;

        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(StoreError::Write)?;

        // Owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(StoreError::Write)?;
        }

        fs::rename(&tmp, &self.path).map_err(StoreError::Write)?;
        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut VaultData) -> Result<T>,
    {
        let _lock = self.lock()?;
        let mut data = self.load()?;
        let out = f(&mut data)?;
        self.save(&data)?;
        Ok(out)
    }
}
