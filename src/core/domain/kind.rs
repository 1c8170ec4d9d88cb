//! Record kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Website credentials (username + password).
    Account,
    /// MFA seed.
    Seed,
    /// Secure note. The record name is its title.
    Note,
}

impl RecordKind {
    /// Stable name used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Seed => "seed",
            Self::Note => "note",
        }
    }

    /// Human label used in share invitations.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Account => "credential",
            Self::Seed => "MFA credential",
            Self::Note => "note",
        }
    }

    /// App page the receiver lands on after accepting a share.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Self::Account => "/app/credentials",
            Self::Seed => "/app/mfa",
            Self::Note => "/app/notes",
        }
    }

    /// Sensitive fields a record of this kind carries, in storage order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Account => &["username", "password"],
            Self::Seed => &["seed"],
            Self::Note => &["body"],
        }
    }

    /// Normalize a record name before it is stored.
    ///
    /// Credentials and seeds are named after the site they belong to, so
    /// their names are reduced to the bare domain. Note titles are kept.
    pub fn normalize_name(&self, name: &str) -> String {
        match self {
            Self::Note => name.trim().to_string(),
            Self::Account | Self::Seed => extract_domain(name),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "account" => Ok(Self::Account),
            "seed" => Ok(Self::Seed),
            "note" => Ok(Self::Note),
            other => Err(ValidationError::InvalidKind(other.to_string())),
        }
    }
}

/// Reduce a URL or host to its domain: no scheme, credentials, port, path or `www.`.
fn extract_domain(input: &str) -> String {
    let s = input.trim();
    let s = s.split_once("://").map_or(s, |(_, rest)| rest);
    let s = s.split(['/', '?', '#']).next().unwrap_or_default();
    let s = s.rsplit_once('@').map_or(s, |(_, host)| host);
    let s = s.split(':').next().unwrap_or_default();
    let s = s.strip_prefix("www.").unwrap_or(s);
    s.to_ascii_lowercase()
}
