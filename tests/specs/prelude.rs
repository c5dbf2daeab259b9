//! Test helpers for black-box `ntm` CLI specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch `--data-dir` plus a `Command` builder bound to it, so every
/// spec gets an isolated persistence root.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("tempdir") }
    }

    /// A fresh `ntm` invocation with `--data-dir` already pointed at this
    /// sandbox's scratch directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ntm").expect("ntm binary");
        cmd.arg("--data-dir").arg(self.dir.path());
        cmd
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}
