//! User operations.

use chrono::Utc;
use tracing::{debug, info};

use super::{validate_email, Session, Vault};
use crate::core::cipher::{open, seal};
use crate::core::keys::{create_master_key, rewrap_all, unlock_master_key};
use crate::core::store::{Store, UserEntry};
use crate::core::types::Username;
use crate::error::{Result, StoreError};

impl<S: Store> Vault<S> {
    /// Register a new user.
    ///
    /// Generates the user's master key and id and seals both under the login
    /// password.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidReceiver` if `username` is not an
    /// email address, `CipherError::KeyDerivation` for an empty password and
    /// `StoreError::UserExists` if the name is taken.
    pub fn register(&self, username: &str, password: &str) -> Result<Session> {
        validate_email(username)?;

        let (master, wrapped_master_key) = create_master_key(password)?;
        let uid = uuid::Uuid::new_v4().to_string();
        let wrapped_uid = seal(&uid, password)?;

        self.store.transact(|data| {
            if data.users.contains_key(username) {
                return Err(StoreError::UserExists(username.to_string()).into());
            }
            data.users.insert(
                username.to_string(),
                UserEntry {
                    wrapped_master_key,
                    wrapped_uid,
                    created_at: Utc::now(),
                },
            );
            Ok(())
        })?;

        info!(user = username, "user registered");
        Ok(Session {
            username: username.to_string(),
            uid,
            master,
        })
    }

    /// Unlock a user's master key with their password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` for an unknown user and
    /// `CipherError::Authentication` for a wrong password.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let data = self.store.load()?;
        let entry = data
            .users
            .get(username)
            .ok_or_else(|| StoreError::UserNotFound(username.to_string()))?;

        let master = unlock_master_key(&entry.wrapped_master_key, password)?;
        let uid = open(&entry.wrapped_uid, password)?;

        debug!(user = username, "session unlocked");
        Ok(Session {
            username: username.to_string(),
            uid: uid.to_string(),
            master,
        })
    }

    /// Change a user's login password.
    ///
    /// Every value sealed under the old password is re-sealed under the new
    /// one in a single transaction; if any of them fails to re-wrap, the
    /// stored user is left exactly as it was. Record keys are wrapped under
    /// the master key, which does not change, so they are untouched.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` if `old` is wrong and
    /// `CipherError::KeyDerivation` if `new` is empty.
    pub fn change_password(&self, username: &str, old: &str, new: &str) -> Result<()> {
        self.store.transact(|data| {
            let entry = data
                .users
                .get_mut(username)
                .ok_or_else(|| StoreError::UserNotFound(username.to_string()))?;

            let rewrapped = rewrap_all(
                &[entry.wrapped_master_key.as_str(), entry.wrapped_uid.as_str()],
                old,
                new,
            )?;
            for (slot, value) in [&mut entry.wrapped_master_key, &mut entry.wrapped_uid]
                .into_iter()
                .zip(rewrapped)
            {
                *slot = value;
            }
            Ok(())
        })?;

        info!(user = username, "password changed");
        Ok(())
    }

    /// Registered usernames, sorted.
    pub fn users(&self) -> Result<Vec<Username>> {
        Ok(self.store.load()?.users.into_keys().collect())
    }
}
