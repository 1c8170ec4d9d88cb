//! Off-thread envelope operations.
//!
//! Key derivation is deliberately slow, so these wrappers run it on tokio's
//! blocking pool instead of an async worker thread. Dropping the returned
//! future abandons the result; the blocking call finishes on its own and
//! touches no shared state.

use tokio::task::{spawn_blocking, JoinError};
use tracing::warn;
use zeroize::Zeroizing;

use crate::core::cipher::{self, DerivedKey, Purpose};
use crate::error::{Error, Result};

fn join_error(e: JoinError) -> Error {
    warn!(error = %e, "blocking crypto task failed");
    Error::Task(e.to_string())
}

/// [`cipher::seal`] on the blocking pool.
pub async fn seal(plaintext: &str, password: &str) -> Result<String> {
    let plaintext = Zeroizing::new(plaintext.to_string());
    let password = Zeroizing::new(password.to_string());
    spawn_blocking(move || cipher::seal(&plaintext, &password))
        .await
        .map_err(join_error)?
}

/// [`cipher::open`] on the blocking pool.
pub async fn open(sealed: &str, password: &str) -> Result<Zeroizing<String>> {
    let sealed = sealed.to_string();
    let password = Zeroizing::new(password.to_string());
    spawn_blocking(move || cipher::open(&sealed, &password))
        .await
        .map_err(join_error)?
}

/// [`cipher::derive_key`] on the blocking pool.
pub async fn derive_key(password: &str, salt: &[u8], purpose: Purpose) -> Result<DerivedKey> {
    let password = Zeroizing::new(password.to_string());
    let salt = salt.to_vec();
    spawn_blocking(move || cipher::derive_key(&password, &salt, purpose))
        .await
        .map_err(join_error)?
}
