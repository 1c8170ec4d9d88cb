//! Record owner entry.

use serde::{Deserialize, Serialize};

use crate::core::types::{Sealed, Username};

/// One user holding access to a record.
///
/// `wrapped_key` is the record key sealed under that user's master key, so
/// every owner carries their own copy of the record key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub username: Username,
    pub wrapped_key: Sealed,
}

impl Owner {
    pub fn new(username: impl Into<Username>, wrapped_key: Sealed) -> Self {
        Self {
            username: username.into(),
            wrapped_key,
        }
    }
}
