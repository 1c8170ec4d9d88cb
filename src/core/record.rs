//! Wrapped record data.
//!
//! Sensitive fields are sealed element-wise under the record key; the record
//! key is sealed under the owner's master key. Opening goes the other way.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::{open_all, seal_all};
use crate::core::domain::{MasterKey, RecordKey};
use crate::core::keys::{unwrap_record_key, wrap_record_key};
use crate::core::types::Sealed;
use crate::error::Result;

/// Record fields sealed under a record key, plus that key wrapped for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    pub fields: Vec<Sealed>,
    pub wrapped_key: Sealed,
}

/// Seal `fields` under a record key and wrap the key under `master`.
///
/// Pass `key` to keep an existing record key (editing a shared record must
/// not change the key other owners hold); otherwise a fresh one is generated.
pub fn seal_record<S: AsRef<str>>(
    fields: &[S],
    master: &MasterKey,
    key: Option<&RecordKey>,
) -> Result<(RecordKey, SealedRecord)> {
    let key = key.cloned().unwrap_or_else(RecordKey::generate);
    debug!(fields = fields.len(), "sealing record");

    let sealed_fields = seal_fields(fields, &key)?;
    let wrapped_key = wrap_record_key(&key, master)?;

    Ok((
        key,
        SealedRecord {
            fields: sealed_fields,
            wrapped_key,
        },
    ))
}

/// Unwrap the record key with `master` and open every field.
pub fn open_record(record: &SealedRecord, master: &MasterKey) -> Result<Vec<Zeroizing<String>>> {
    let key = unwrap_record_key(&record.wrapped_key, master)?;
    open_fields(&record.fields, &key)
}

/// Seal fields under a record key, preserving order.
pub fn seal_fields<S: AsRef<str>>(fields: &[S], key: &RecordKey) -> Result<Vec<Sealed>> {
    seal_all(fields, key.expose())
}

/// Open fields sealed under a record key, preserving order.
pub fn open_fields<S: AsRef<str>>(fields: &[S], key: &RecordKey) -> Result<Vec<Zeroizing<String>>> {
    open_all(fields, key.expose())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_record() {
        let master = MasterKey::generate();
        let (_, record) = seal_record(&["alice", "hunter2"], &master, None).unwrap();

        let fields = open_record(&record, &master).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].as_str(), "alice");
        assert_eq!(fields[1].as_str(), "hunter2");
    }

    #[test]
    fn test_existing_key_is_kept() {
        let master = MasterKey::generate();
        let key = RecordKey::generate();
        let (used, record) = seal_record(&["body"], &master, Some(&key)).unwrap();
        assert_eq!(used.expose(), key.expose());

        // Anyone holding the record key can read the fields directly.
        let fields = open_fields(&record.fields, &key).unwrap();
        assert_eq!(fields[0].as_str(), "body");
    }

    #[test]
    fn test_open_with_wrong_master_fails() {
        let (_, record) = seal_record(&["x"], &MasterKey::generate(), None).unwrap();
        assert!(open_record(&record, &MasterKey::generate())
            .unwrap_err()
            .is_authentication());
    }
}
