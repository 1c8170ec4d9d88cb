//! Domain types.

mod kind;
mod owner;
mod secret;

pub use kind::RecordKind;
pub use owner::Owner;
pub use secret::{generate_plain_secret, MasterKey, RecordKey, ShareSecret};
