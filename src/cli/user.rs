//! User commands.

use std::io::{self, IsTerminal};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::{Result, ValidationError};

/// Register a user.
pub fn add(ctx: &Context, username: &str) -> Result<()> {
    let password = match ctx.supplied_password() {
        Some(password) => password,
        None if io::stdin().is_terminal() => {
            new_password_prompt(&format!("Password for {}", username))?
        }
        None => return Err(ValidationError::Empty("password").into()),
    };

    ctx.vault().register(username, &password)?;
    output::success(&format!("registered {}", output::id(username)));
    Ok(())
}

fn new_password_prompt(prompt: &str) -> Result<Zeroizing<String>> {
    let password = Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "passwords do not match")
        .interact()?;
    Ok(Zeroizing::new(password))
}

/// Change the acting user's password.
pub fn passwd(ctx: &Context, new_password: Option<String>) -> Result<()> {
    let username = ctx.username()?;
    let old = ctx.password(&format!("Current password for {}", username))?;
    let new = match new_password {
        Some(password) => Zeroizing::new(password),
        None if io::stdin().is_terminal() => new_password_prompt("New password")?,
        None => return Err(ValidationError::Empty("new password").into()),
    };

    ctx.vault().change_password(username, &old, &new)?;
    output::success(&format!("password changed for {}", output::id(username)));
    Ok(())
}

/// List registered users.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let users = ctx.vault().users()?;

    if json {
        let result = serde_json::json!({
            "users": users,
            "count": users.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if users.is_empty() {
        output::dimmed("no users registered");
    } else {
        output::section(&format!("{} users", users.len()));
        for user in &users {
            output::list_item(user);
        }
    }
    Ok(())
}
