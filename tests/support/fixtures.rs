//! Test fixtures and constants.

pub const ALICE: &str = "alice@example.com";
pub const ALICE_PW: &str = "alice-password";

pub const BOB: &str = "bob@example.com";
pub const BOB_PW: &str = "bob-password";

pub const CAROL: &str = "carol@example.com";
pub const CAROL_PW: &str = "carol-password";

/// SHA-256 of "abc".
pub const ABC_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
