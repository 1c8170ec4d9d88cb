//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a hexagon command with an isolated environment.
    ///
    /// HOME points at the temp home, the config path is pinned inside it and
    /// any credentials from the outer environment are cleared.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("hexagon").expect("failed to find hexagon binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env(
            "HEXAGON_CONFIG",
            self.home.path().join(".hexagon").join("config.toml"),
        );
        cmd.env("NO_COLOR", "1");
        for var in [
            "HEXAGON_USER",
            "HEXAGON_PASSWORD",
            "HEXAGON_NEW_PASSWORD",
            "HEXAGON_STORE",
            "HEXAGON_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command acting as `user`.
    pub fn as_user(&self, user: &str, password: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("HEXAGON_USER", user).env("HEXAGON_PASSWORD", password);
        cmd
    }

    /// Shortcut for `hexagon user add`.
    pub fn user_add(&self, user: &str, password: &str) -> Output {
        self.cmd()
            .args(["user", "add", user, "--password", password])
            .output()
            .expect("failed to run hexagon user add")
    }

    /// Shortcut for `hexagon record add`; returns the new record id.
    pub fn record_add(&self, user: &str, password: &str, kind: &str, name: &str, fields: &[&str]) -> String {
        let output = self
            .as_user(user, password)
            .args(["record", "add", kind, name])
            .args(fields)
            .output()
            .expect("failed to run hexagon record add");
        super::assert_success(&output);
        super::last_line(&output)
    }

    /// Shortcut for `hexagon record show`.
    pub fn record_show(&self, user: &str, password: &str, id: &str) -> Output {
        self.as_user(user, password)
            .args(["record", "show", id])
            .output()
            .expect("failed to run hexagon record show")
    }

    /// Shortcut for `hexagon share create`; returns the link.
    pub fn share_create(&self, user: &str, password: &str, record: &str, receiver: &str) -> String {
        let output = self
            .as_user(user, password)
            .args(["share", "create", record, receiver])
            .output()
            .expect("failed to run hexagon share create");
        super::assert_success(&output);
        super::last_line(&output)
    }

    /// Shortcut for `hexagon share accept`.
    pub fn share_accept(&self, user: &str, password: &str, link: &str) -> Output {
        self.as_user(user, password)
            .args(["share", "accept", link])
            .output()
            .expect("failed to run hexagon share accept")
    }
}
