//! Per-invocation state: resolved config, store location and credentials.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::GlobalArgs;
use crate::core::config::Config;
use crate::core::store::Filesystem;
use crate::core::vault::{Session, Vault};
use crate::error::{Result, ValidationError};

pub struct Context {
    config: Config,
    store: PathBuf,
    user: Option<String>,
    password: Option<Zeroizing<String>>,
}

impl Context {
    /// Load the config and resolve the store path (`--store` wins).
    pub fn new(global: GlobalArgs) -> Result<Self> {
        let config = Config::load()?;
        let store = match global.store {
            Some(path) => path,
            None => config.store_path()?,
        };
        debug!(store = %store.display(), "resolved store");

        Ok(Self {
            config,
            store,
            user: global.user,
            password: global.password.map(Zeroizing::new),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn vault(&self) -> Vault<Filesystem> {
        Vault::new(Filesystem::new(&self.store))
    }

    /// The acting user from `--user` / `HEXAGON_USER`.
    pub fn username(&self) -> Result<&str> {
        self.user
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ValidationError::Empty("user").into())
    }

    /// The password from `--password` / `HEXAGON_PASSWORD`, if any.
    pub fn supplied_password(&self) -> Option<Zeroizing<String>> {
        self.password.clone()
    }

    /// The supplied password, else a hidden prompt.
    pub fn password(&self, prompt: &str) -> Result<Zeroizing<String>> {
        if let Some(password) = self.supplied_password() {
            return Ok(password);
        }
        if !io::stdin().is_terminal() {
            return Err(ValidationError::Empty("password").into());
        }
        Ok(Zeroizing::new(
            Password::new().with_prompt(prompt).interact()?,
        ))
    }

    /// Unlock the acting user.
    pub fn login(&self, vault: &Vault<Filesystem>) -> Result<Session> {
        let username = self.username()?;
        let password = self.password(&format!("Password for {}", username))?;
        vault.login(username, &password)
    }
}

/// Use `arg` if given, else read stdin, else prompt with hidden input.
pub fn read_value(arg: Option<String>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(value) = arg {
        return Ok(Zeroizing::new(value));
    }
    if io::stdin().is_terminal() {
        return Ok(Zeroizing::new(
            Password::new().with_prompt(prompt).interact()?,
        ));
    }
    let mut input = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut input)?;
    let trimmed = input.trim_end_matches(['\r', '\n']).len();
    input.truncate(trimmed);
    Ok(input)
}

/// Field values for a record: the given ones, or one hidden prompt per field.
pub fn read_fields(given: Vec<String>, names: &[&str]) -> Result<Vec<Zeroizing<String>>> {
    if !given.is_empty() {
        return Ok(given.into_iter().map(Zeroizing::new).collect());
    }
    if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut input)?;
        return Ok(input
            .lines()
            .take(names.len())
            .map(|line| Zeroizing::new(line.to_string()))
            .collect());
    }
    names
        .iter()
        .map(|name| {
            let value = Password::new()
                .with_prompt(*name)
                .allow_empty_password(true)
                .interact()?;
            Ok(Zeroizing::new(value))
        })
        .collect()
}
