//! Standalone envelope commands: seal, open, digest, generate.
//!
//! Results go to stdout undecorated so they can be piped.

use rand::rngs::OsRng;
use tracing::debug;

use crate::cli::context::{read_value, Context};
use crate::core::cipher;
use crate::core::digest as sha256;
use crate::core::domain::generate_plain_secret;
use crate::error::Result;

/// Seal a value and print the envelope.
pub fn seal(ctx: &Context, plaintext: Option<String>) -> Result<()> {
    let plaintext = read_value(plaintext, "Value to seal")?;
    let password = ctx.password("Password")?;

    let sealed = cipher::seal(&plaintext, &password)?;
    debug!(len = sealed.len(), "sealed value");
    println!("{}", sealed);
    Ok(())
}

/// Open an envelope and print the plaintext.
pub fn open(ctx: &Context, sealed: Option<String>) -> Result<()> {
    let sealed = read_value(sealed, "Sealed value")?;
    let password = ctx.password("Password")?;

    let plaintext = cipher::open(sealed.trim(), &password)?;
    println!("{}", plaintext.as_str());
    Ok(())
}

/// Print the SHA-256 hex digest of a message.
pub fn digest(message: Option<String>) -> Result<()> {
    let message = read_value(message, "Message")?;
    println!("{}", sha256::digest(&message));
    Ok(())
}

/// Print a fresh random secret.
pub fn generate() -> Result<()> {
    println!("{}", generate_plain_secret(&mut OsRng).as_str());
    Ok(())
}
