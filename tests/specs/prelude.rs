// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: an isolated home directory and fluent assertions.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// A `jw` invocation with its own HOME, config and state directories.
pub struct Cli {
    cmd: Command,
    home: TempDir,
}

pub fn cli() -> Cli {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("jw").unwrap();
    for var in ["JW_BASE_URL", "JW_TOKEN", "JW_STATE_DIR", "JW_CONFIG", "JW_LOG", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_STATE_HOME", home.path().join("state"))
        .env("NO_COLOR", "1");
    Cli { cmd, home }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// The state directory the binary falls back to.
    pub fn state_dir(&self) -> PathBuf {
        self.home.path().join("state").join("jw")
    }

    /// Write a file relative to the isolated home.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.home.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome { output, _home: self.home };
        assert!(outcome.output.status.success(), "expected success\n{}", outcome.describe());
        outcome
    }

    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome { output, _home: self.home };
        assert!(!outcome.output.status.success(), "expected failure\n{}", outcome.describe());
        outcome
    }
}

pub struct Outcome {
    output: Output,
    _home: TempDir,
}

impl Outcome {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout().contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(code), "{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("status: {}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}

/// A stored log buffer with `n` lines, oldest first.
pub fn stored_logs(n: usize) -> String {
    let entries: Vec<_> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "level": "INFO",
                "message": format!("line {i}"),
                "timestamp": format!("2026-01-30T08:00:{i:02}Z"),
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}
