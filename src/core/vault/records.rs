//! Record operations.

use serde::Serialize;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::{owned_record, owned_record_mut, Session, Vault};
use crate::core::domain::{Owner, RecordKind};
use crate::core::keys::unwrap_record_key;
use crate::core::record::{open_fields, seal_fields, seal_record};
use crate::core::store::{Store, StoredRecord};
use crate::core::types::{RecordId, Username};
use crate::error::{Result, StoreError, ValidationError};

/// Non-secret view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub id: RecordId,
    pub kind: RecordKind,
    pub name: String,
    pub owners: Vec<Username>,
}

/// A record with its fields opened.
#[derive(Debug)]
pub struct RevealedRecord {
    pub id: RecordId,
    pub kind: RecordKind,
    pub name: String,
    /// `(field name, value)` in `kind.field_names()` order.
    pub fields: Vec<(&'static str, Zeroizing<String>)>,
}

fn check_fields<F: AsRef<str>>(kind: RecordKind, fields: &[F]) -> Result<()> {
    let expected = kind.field_names().len();
    if fields.len() != expected {
        return Err(ValidationError::FieldCount {
            kind: kind.as_str(),
            expected,
            actual: fields.len(),
        }
        .into());
    }
    Ok(())
}

impl<S: Store> Vault<S> {
    /// Create a record owned by the session user.
    ///
    /// A fresh record key seals the fields; the key itself is wrapped under
    /// the user's master key.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an empty name or a wrong field count.
    pub fn add_record<F: AsRef<str>>(
        &self,
        session: &Session,
        kind: RecordKind,
        name: &str,
        fields: &[F],
    ) -> Result<RecordId> {
        let name = kind.normalize_name(name);
        if name.is_empty() {
            return Err(ValidationError::Empty("name").into());
        }
        check_fields(kind, fields)?;

        let (_, sealed) = seal_record(fields, session.master(), None)?;
        let id = uuid::Uuid::new_v4().to_string();

        self.store.transact(|data| {
            data.records.insert(
                id.clone(),
                StoredRecord {
                    kind,
                    name: name.clone(),
                    fields: sealed.fields,
                    owners: vec![Owner::new(session.username(), sealed.wrapped_key)],
                },
            );
            Ok(())
        })?;

        info!(record = %id, kind = %kind, "record added");
        Ok(id)
    }

    /// Records the session user owns, sorted by id.
    pub fn records(&self, session: &Session) -> Result<Vec<RecordSummary>> {
        let data = self.store.load()?;
        Ok(data
            .records
            .into_iter()
            .filter(|(_, r)| r.owner(session.username()).is_some())
            .map(|(id, r)| RecordSummary {
                id,
                kind: r.kind,
                name: r.name,
                owners: r.owners.into_iter().map(|o| o.username).collect(),
            })
            .collect())
    }

    /// Open a record's fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RecordNotFound` or `ShareError::Unauthorized`
    /// if the session user cannot see the record.
    pub fn reveal(&self, session: &Session, record_id: &str) -> Result<RevealedRecord> {
        let data = self.store.load()?;
        let record = owned_record(&data, session, record_id)?;
        let owner = record
            .owner(session.username())
            .ok_or_else(|| StoreError::OwnerNotFound(session.username().to_string()))?;

        let key = unwrap_record_key(&owner.wrapped_key, session.master())?;
        let values = open_fields(&record.fields, &key)?;

        debug!(record = record_id, "record revealed");
        Ok(RevealedRecord {
            id: record_id.to_string(),
            kind: record.kind,
            name: record.name.clone(),
            fields: record
                .kind
                .field_names()
                .iter()
                .copied()
                .zip(values)
                .collect(),
        })
    }

    /// Replace a record's fields, keeping its record key.
    ///
    /// Other owners keep working without re-wrapping because the key they
    /// hold does not change.
    pub fn update_record<F: AsRef<str>>(
        &self,
        session: &Session,
        record_id: &str,
        fields: &[F],
    ) -> Result<()> {
        self.store.transact(|data| {
            let record = owned_record_mut(data, session, record_id)?;
            check_fields(record.kind, fields)?;

            let owner = record
                .owner(session.username())
                .ok_or_else(|| StoreError::OwnerNotFound(session.username().to_string()))?;
            let key = unwrap_record_key(&owner.wrapped_key, session.master())?;

            record.fields = seal_fields(fields, &key)?;
            Ok(())
        })?;

        info!(record = record_id, "record updated");
        Ok(())
    }

    /// Drop the session user's own access to a record.
    ///
    /// The record is deleted once its last owner is gone. Returns whether
    /// that happened.
    pub fn remove_record(&self, session: &Session, record_id: &str) -> Result<bool> {
        let username = session.username().to_string();
        self.revoke_owner(session, record_id, &username)
    }

    /// Remove `username` from a record's owners.
    ///
    /// Removing the last owner deletes the record along with any pending
    /// shares for it. Returns whether the record was deleted.
    ///
    /// # Errors
    ///
    /// Returns `ShareError::Unauthorized` unless the session user owns the
    /// record, and `StoreError::OwnerNotFound` if `username` is not an owner.
    pub fn revoke_owner(&self, session: &Session, record_id: &str, username: &str) -> Result<bool> {
        let deleted = self.store.transact(|data| {
            let record = owned_record_mut(data, session, record_id)?;
            let idx = record
                .owners
                .iter()
                .position(|o| o.username == username)
                .ok_or_else(|| StoreError::OwnerNotFound(username.to_string()))?;
            record.owners.remove(idx);

            if !record.owners.is_empty() {
                return Ok(false);
            }
            data.records.remove(record_id);
            data.shares.retain(|_, share| share.record_id != record_id);
            Ok(true)
        })?;

        info!(record = record_id, owner = username, deleted, "owner revoked");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Memory;

    fn vault_with_alice() -> (Vault<Memory>, Session) {
        let vault = Vault::new(Memory::new());
        let alice = vault.register("alice@example.com", "alice-pw").unwrap();
        (vault, alice)
    }

    #[test]
    fn test_add_and_reveal() {
        let (vault, alice) = vault_with_alice();
        let id = vault
            .add_record(&alice, RecordKind::Account, "https://www.github.com/login", &["alice", "hunter2"])
            .unwrap();

        let record = vault.reveal(&alice, &id).unwrap();
        assert_eq!(record.name, "github.com");
        assert_eq!(record.fields[0].0, "username");
        assert_eq!(record.fields[0].1.as_str(), "alice");
        assert_eq!(record.fields[1].0, "password");
        assert_eq!(record.fields[1].1.as_str(), "hunter2");
    }

    #[test]
    fn test_store_holds_no_plaintext() {
        let (vault, alice) = vault_with_alice();
        vault
            .add_record(&alice, RecordKind::Note, "diary", &["dear diary"])
            .unwrap();

        let dump = format!("{:?}", vault.store().load().unwrap());
        assert!(!dump.contains("dear diary"));
        assert!(!dump.contains(alice.master().expose()));
    }

    #[test]
    fn test_wrong_field_count() {
        let (vault, alice) = vault_with_alice();
        let err = vault
            .add_record(&alice, RecordKind::Account, "site.com", &["only-username"])
            .unwrap_err();
        assert!(err.to_string().contains("2 field(s)"));
    }

    #[test]
    fn test_update_keeps_record() {
        let (vault, alice) = vault_with_alice();
        let id = vault
            .add_record(&alice, RecordKind::Seed, "aws.amazon.com", &["JBSWY3DPEHPK3PXP"])
            .unwrap();
        vault.update_record(&alice, &id, &["NEWSEED"]).unwrap();

        let record = vault.reveal(&alice, &id).unwrap();
        assert_eq!(record.fields[0].1.as_str(), "NEWSEED");
    }

    #[test]
    fn test_remove_last_owner_deletes() {
        let (vault, alice) = vault_with_alice();
        let id = vault
            .add_record(&alice, RecordKind::Note, "todo", &["milk"])
            .unwrap();

        assert!(vault.remove_record(&alice, &id).unwrap());
        assert!(vault.reveal(&alice, &id).unwrap_err().is_not_found());
        assert!(vault.records(&alice).unwrap().is_empty());
    }

    #[test]
    fn test_stranger_cannot_reveal() {
        let (vault, alice) = vault_with_alice();
        let mallory = vault.register("mallory@example.com", "pw").unwrap();
        let id = vault
            .add_record(&alice, RecordKind::Note, "secret", &["body"])
            .unwrap();

        assert!(vault.reveal(&mallory, &id).unwrap_err().is_unauthorized());
        assert!(vault
            .revoke_owner(&mallory, &id, "alice@example.com")
            .unwrap_err()
            .is_unauthorized());
    }
}
