// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DEFINITIONS: &str = r#"
[[integration]]
name = "Linux"
connection = "ssh"
modules = ["ping", "service"]

[[integration]]
name = "Local Tools"
modules = ["service"]
"#;

/// Temporary project holding definitions, parameters and a stand-in engine
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        project.file("integrations.toml", DEFINITIONS);
        project.engine("exit 0\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Replace the engine binary with a shell script
    pub fn engine(&self, body: &str) -> PathBuf {
        let path = self.file("ansible", &format!("#!/bin/sh\n{}", body));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Engine that prints `output` regardless of its arguments
    pub fn engine_output(&self, output: &str) -> PathBuf {
        self.engine(&format!("cat <<'EOF'\n{}EOF\n", output))
    }

    /// `hr` with config pointed at this project
    pub fn hr(&self) -> Command {
        let mut cmd = Command::cargo_bin("hr").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("HR_DEFINITION", self.path().join("integrations.toml"))
            .env("HR_ANSIBLE_BIN", self.path().join("ansible"))
            .env_remove("HR_PARAMS")
            .env_remove("RUST_LOG");
        cmd
    }
}
