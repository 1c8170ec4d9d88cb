//! Core library components.
//!
//! The cryptographic layer (cipher, keys, record, share) is stateless and
//! takes every secret as an explicit argument. The vault ties it to a store.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod digest;
pub mod domain;
pub mod keys;
pub mod record;
pub mod share;
pub mod store;
pub mod types;
pub mod vault;
#[cfg(feature = "worker")]
pub mod worker;
