//! Type aliases for domain concepts.

/// A hexagon username (the email address the account was created with).
pub type Username = String;

/// Identifier of a stored record (uuid v4).
pub type RecordId = String;

/// Identifier of a pending share token (uuid v4).
pub type ShareId = String;

/// A sealed envelope in its base64 wire form.
pub type Sealed = String;
