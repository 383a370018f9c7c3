//! Common test utilities for vlsi-flow integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's config or write into their cache directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

use std::path::{Path, PathBuf};

/// A test environment with an isolated config file and output directory.
///
/// The config file disables the viewer and points `output-dir` into the
/// temporary directory. `cmd()` passes it via `VLSI_FLOW_CONFIG`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    /// Create a new test environment with the default test config.
    pub fn new() -> Self {
        let env = Self {
            root: TempDir::new().unwrap(),
        };
        let config = format!(
            "output-dir #\"{}\"#\nopen-viewer #false\n",
            env.out_dir().display()
        );
        env.write_config(&config);
        env
    }

    /// Replace the config file contents.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).unwrap();
    }

    /// Get a Command for the vlsi-flow binary using this environment's config.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vlsi-flow"));
        cmd.current_dir(self.root.path());
        cmd.env("VLSI_FLOW_CONFIG", self.config_path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.kdl")
    }

    /// Directory configured as `output-dir`.
    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    /// Path to the root directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be valid JSON")
}
