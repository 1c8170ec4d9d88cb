//! Test support utilities for hexagon integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// The config and the default vault live under `home`, so tests never touch
/// the real `~/.hexagon` and can run in parallel.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Create a test environment with the given users registered.
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        let t = Self::new();
        for (user, password) in users {
            let output = t.user_add(user, password);
            assert!(
                output.status.success(),
                "Failed to register {}: {}",
                user,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Default vault location inside the temp home.
    pub fn store_path(&self) -> std::path::PathBuf {
        self.home.path().join(".hexagon").join("vault.toml")
    }
}
