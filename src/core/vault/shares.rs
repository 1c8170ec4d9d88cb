//! Share lifecycle: create, finalize, cancel.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{owned_record, validate_email, Session, Vault};
use crate::core::domain::{Owner, ShareSecret};
use crate::core::keys::{unwrap_record_key, wrap_record_key};
use crate::core::share::{self, Decision, Outcome, PendingShare, ShareLink};
use crate::core::store::Store;
use crate::core::types::{RecordId, ShareId};
use crate::error::{Result, ShareError, StoreError};

impl<S: Store> Vault<S> {
    /// Offer a record to `receiver`.
    ///
    /// Persists a pending token and returns its id with the link to send.
    /// The link is the only copy of the share secret.
    ///
    /// # Errors
    ///
    /// Returns `ShareError::Unauthorized` unless the session user owns the
    /// record, and `ValidationError::InvalidReceiver` for a malformed email.
    pub fn create_share(
        &self,
        session: &Session,
        record_id: &str,
        receiver: &str,
        base_url: &str,
    ) -> Result<(ShareId, ShareLink)> {
        validate_email(receiver)?;

        let share_id = uuid::Uuid::new_v4().to_string();
        let link = self.store.transact(|data| {
            let record = owned_record(data, session, record_id)?;
            let owner = record
                .owner(session.username())
                .ok_or_else(|| StoreError::OwnerNotFound(session.username().to_string()))?;
            let key = unwrap_record_key(&owner.wrapped_key, session.master())?;

            let created = share::create_share(&key, receiver, key.expose())?;
            let link = ShareLink::new(base_url, &share_id, &created.secret, record.kind);

            let pending = PendingShare {
                record_id: record_id.to_string(),
                kind: record.kind,
                name: record.name.clone(),
                created_at: Utc::now(),
                token: created.token,
            };
            data.shares.insert(share_id.clone(), pending);
            Ok(link)
        })?;

        info!(record = record_id, share = %share_id, "share created");
        Ok((share_id, link))
    }

    /// Accept or decline a share as the session user.
    ///
    /// Either way the token is consumed. On accept the recovered record key
    /// is wrapped under the session user's master key and they become an
    /// owner. Returns the record id on accept.
    ///
    /// A failed attempt (wrong secret, wrong receiver) commits nothing, so
    /// the intended receiver can still use the token.
    ///
    /// # Errors
    ///
    /// Returns `ShareError::NotFound` for an unknown or already used token,
    /// `CipherError::Authentication` for a wrong secret and
    /// `ShareError::Unauthorized` if the session user is not the receiver.
    pub fn finalize_share(
        &self,
        session: &Session,
        share_id: &str,
        secret: &ShareSecret,
        decision: Decision,
    ) -> Result<Option<RecordId>> {
        let result = self.store.transact(|data| {
            let pending = data
                .shares
                .get(share_id)
                .cloned()
                .ok_or_else(|| ShareError::NotFound(share_id.to_string()))?;

            let outcome = pending.token.finalize(secret, session.username(), decision)?;
            data.shares.remove(share_id);

            let key = match outcome {
                Outcome::Accepted(key) => key,
                Outcome::Declined => return Ok(None),
            };

            let record = data
                .records
                .get_mut(&pending.record_id)
                .ok_or_else(|| StoreError::RecordNotFound(pending.record_id.clone()))?;
            let wrapped = wrap_record_key(&key, session.master())?;

            match record.owners.iter_mut().find(|o| o.username == session.username()) {
                Some(existing) => existing.wrapped_key = wrapped,
                None => record.owners.push(Owner::new(session.username(), wrapped)),
            }
            Ok(Some(pending.record_id))
        });

        match &result {
            Ok(Some(record)) => info!(share = share_id, record = %record, "share accepted"),
            Ok(None) => info!(share = share_id, "share declined"),
            Err(e) if e.is_unauthorized() => warn!(share = share_id, "share finalize by wrong receiver"),
            Err(_) => {}
        }
        result
    }

    /// Cancel a pending share before it is used.
    ///
    /// # Errors
    ///
    /// Returns `ShareError::NotFound` if no such token exists for the record
    /// and `ShareError::Unauthorized` unless the session user owns it.
    pub fn delete_share(&self, session: &Session, record_id: &str, share_id: &str) -> Result<()> {
        self.store.transact(|data| {
            owned_record(data, session, record_id)?;
            match data.shares.get(share_id) {
                Some(pending) if pending.record_id == record_id => {}
                _ => return Err(ShareError::NotFound(share_id.to_string()).into()),
            }
            data.shares.remove(share_id);
            Ok(())
        })?;

        info!(share = share_id, "share deleted");
        Ok(())
    }

    /// Pending shares of a record the session user owns.
    pub fn pending_shares(&self, session: &Session, record_id: &str) -> Result<Vec<(ShareId, PendingShare)>> {
        let data = self.store.load()?;
        owned_record(&data, session, record_id)?;

        let pending: Vec<_> = data
            .shares
            .into_iter()
            .filter(|(_, share)| share.record_id == record_id)
            .collect();
        debug!(record = record_id, count = pending.len(), "listed pending shares");
        Ok(pending)
    }
}
