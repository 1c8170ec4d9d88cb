//! Record sharing protocol.
//!
//! The owner seals the record key under a fresh share secret and seals the
//! receiver's identity under the record's own password. The token is stored
//! server-side; the secret travels out-of-band in the share link. The
//! receiver later presents the secret to recover the record key.
//!
//! The two seals use different keys. Holding only the share secret reveals
//! the record key, while the receiver check still goes through the record
//! password.
//!
//! A token is single use. [`ShareToken::finalize`] takes it by value, and the
//! vault deletes the stored copy once a decision has been made.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::cipher::{open, SecretEnvelope};
use crate::core::domain::{RecordKey, RecordKind, ShareSecret};
use crate::core::types::{RecordId, Sealed, ShareId};
use crate::error::{Result, ShareError, ValidationError};

/// The receiver's answer to a share invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

/// What finalizing a share produced.
#[derive(Debug)]
pub enum Outcome {
    /// The recovered record key, ready to be re-wrapped for the receiver.
    Accepted(RecordKey),
    /// Token consumed, no key material produced.
    Declined,
}

/// The persisted half of a share. Holds no plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    /// Receiver identity sealed under the record password.
    pub wrapped_receiver: Sealed,
    /// Record key sealed under the share secret.
    pub wrapped_key: Sealed,
}

/// A freshly created share: the token to persist and the secret to hand out.
#[derive(Debug)]
pub struct NewShare {
    pub token: ShareToken,
    pub secret: ShareSecret,
}

/// Create a share of `record_key` for `receiver`.
///
/// `record_password` is the password the record's own data is sealed under;
/// in the vault this is the record key itself.
pub fn create_share(record_key: &RecordKey, receiver: &str, record_password: &str) -> Result<NewShare> {
    create_share_with(&mut OsRng, record_key, receiver, record_password)
}

/// [`create_share`] with an explicit random source.
pub fn create_share_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    record_key: &RecordKey,
    receiver: &str,
    record_password: &str,
) -> Result<NewShare> {
    if receiver.trim().is_empty() {
        return Err(ValidationError::Empty("receiver").into());
    }

    let secret = ShareSecret::generate_with(&mut *rng);
    let wrapped_receiver = SecretEnvelope::seal_with(&mut *rng, receiver, record_password)?.encode();
    let wrapped_key = SecretEnvelope::seal_with(&mut *rng, record_key.expose(), secret.expose())?.encode();

    debug!("share token created");

    Ok(NewShare {
        token: ShareToken {
            wrapped_receiver,
            wrapped_key,
        },
        secret,
    })
}

impl ShareToken {
    /// Recover the record key with the share secret.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` if the secret is wrong.
    pub fn recover_key(&self, secret: &ShareSecret) -> Result<RecordKey> {
        let key = open(&self.wrapped_key, secret.expose())?;
        Ok(RecordKey::from(key.as_str()))
    }

    /// Check that `claimed` is the receiver this token was created for.
    ///
    /// # Errors
    ///
    /// Returns `ShareError::Unauthorized` on mismatch and
    /// `CipherError::Authentication` if `record_password` is wrong.
    pub fn verify_receiver(&self, record_password: &str, claimed: &str) -> Result<()> {
        let receiver = open(&self.wrapped_receiver, record_password)?;
        if receiver.as_str() != claimed {
            return Err(ShareError::Unauthorized.into());
        }
        Ok(())
    }

    /// Consume the token.
    ///
    /// Recovers the record key, verifies the receiver against the identity
    /// sealed under it, then either hands back the key or nothing.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Authentication` for a wrong secret and
    /// `ShareError::Unauthorized` if `claimed` is not the named receiver.
    pub fn finalize(self, secret: &ShareSecret, claimed: &str, decision: Decision) -> Result<Outcome> {
        let key = self.recover_key(secret)?;
        self.verify_receiver(key.expose(), claimed)?;

        debug!(?decision, "share finalized");
        Ok(match decision {
            Decision::Accept => Outcome::Accepted(key),
            Decision::Decline => Outcome::Declined,
        })
    }
}

/// A share token as the vault stores it, with the record metadata needed to
/// materialize the receiver's copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingShare {
    pub record_id: RecordId,
    pub kind: RecordKind,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub token: ShareToken,
}

/// Link sent to the receiver.
///
/// `shareKey` carries the secret; transport and notification layers must
/// treat the whole link as sensitive and never log it.
pub struct ShareLink(String);

impl ShareLink {
    pub fn new(base_url: &str, share_id: &str, secret: &ShareSecret, kind: RecordKind) -> Self {
        Self(format!(
            "{}?shareId={}&shareKey={}&next={}",
            base_url.trim_end_matches(['?', '/']),
            urlencoding::encode(share_id),
            urlencoding::encode(secret.expose()),
            urlencoding::encode(kind.landing_path()),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pull `shareId` and `shareKey` back out of a link.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLink` if either parameter is missing.
    pub fn parse(link: &str) -> Result<(ShareId, ShareSecret)> {
        let query = link
            .split_once('?')
            .map(|(_, q)| q)
            .ok_or_else(|| ValidationError::InvalidLink("no query string".to_string()))?;
        let query = query.split('#').next().unwrap_or_default();

        let mut share_id = None;
        let mut share_key = None;
        for pair in query.split('&') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value)
                .map_err(|e| ValidationError::InvalidLink(e.to_string()))?
                .into_owned();
            match name {
                "shareId" => share_id = Some(value),
                "shareKey" => share_key = Some(value),
                _ => {}
            }
        }

        match (share_id, share_key) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => {
                Ok((id, ShareSecret::from(key)))
            }
            _ => Err(ValidationError::InvalidLink("missing shareId or shareKey".to_string()).into()),
        }
    }
}

impl std::fmt::Debug for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ShareLink(<redacted>)")
    }
}
