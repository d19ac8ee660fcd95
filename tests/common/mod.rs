//! Common test utilities and fixtures
//!
//! Every test runs the binary inside its own temporary directory with HOME and
//! XDG_CONFIG_HOME pointed there, so no user configuration leaks in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const ROSTER_VARS: &[&str] = &[
    "ROSTER_CONFIG",
    "ROSTER_DATA_FILE",
    "ROSTER_ROLES",
    "ROSTER_PROMPT",
    "ROSTER_BANNER",
    "ROSTER_LOG_LEVEL",
    "ROSTER_LOG_FILE",
    "ROSTER_LOG_JSON",
    "RUST_LOG",
];

/// Isolated working directory for one test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default data file inside the workspace
    pub fn data_file(&self) -> PathBuf {
        self.path().join("members.json")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_data(&self) -> String {
        fs::read_to_string(self.data_file()).unwrap()
    }

    /// The binary, run from the workspace with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("expedition-roster").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"));
        for var in ROSTER_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The REPL with no banner and no prompt, so stdout holds only replies
    pub fn repl(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--no-banner").env("ROSTER_PROMPT", "");
        cmd
    }
}
