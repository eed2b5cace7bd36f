//! Shared testing utilities for aion2-guide CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Command for the compiled binary, run in the work directory with no
    /// completion credential and no inherited log filter.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("aion2-guide").expect("Failed to locate binary");
        cmd.current_dir(self.work_dir()).env_remove("ANTHROPIC_API_KEY").env_remove("RUST_LOG");
        cmd
    }

    /// Write `aion2-guide.toml` into the work directory so every upstream
    /// points at `base_url`.
    pub fn write_config(&self, base_url: &str, providers: &[&str]) -> PathBuf {
        let providers =
            providers.iter().map(|p| format!("\"{}\"", p)).collect::<Vec<_>>().join(", ");
        let content = format!(
            r#"[resolver]
providers = [{providers}]
provider_timeout_ms = 5000

[official]
base_url = "{base_url}"

[third_party]
base_url = "{base_url}"
min_interval_ms = 0

[scrape]
base_url = "{base_url}"
min_interval_ms = 0

[completion]
api_url = "{base_url}/v1/messages"
timeout_secs = 5
"#
        );
        let path = self.work_dir().join("aion2-guide.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write a file into the work directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}
