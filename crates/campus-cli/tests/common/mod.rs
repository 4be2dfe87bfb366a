use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// An isolated HOME for one test, so session storage never touches the
/// developer's real data directory.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of the session storage file the CLI uses under this HOME.
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("data").join("campus").join("storage.json")
    }

    /// Write raw storage contents, e.g. to start with a signed-in session.
    pub fn seed_storage(&self, contents: Value) {
        let path = self.storage_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string(&contents).unwrap()).unwrap();
    }

    /// Read back the storage file, or an empty object if none was written.
    pub fn storage(&self) -> Value {
        match fs::read_to_string(self.storage_path()) {
            Ok(raw) => serde_json::from_str(&raw).expect("storage is not JSON"),
            Err(_) => Value::Object(Default::default()),
        }
    }

    /// Run the CLI binary against `api_url` with this HOME.
    pub fn run(&self, args: &[&str], api_url: &str) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_campus"));
        cmd.args(args);
        cmd.env("HOME", self.dir.path());
        cmd.env("XDG_DATA_HOME", self.dir.path().join("data"));
        cmd.env("CAMPUS_API_URL", api_url);
        cmd.env_remove("CAMPUS_DISABLE_REFRESH");
        cmd.env_remove("CAMPUS_API_TIMEOUT_MS");
        cmd.env_remove("RUST_LOG");
        cmd.output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub fn run_success(&self, args: &[&str], api_url: &str) -> String {
        let output = self.run(args, api_url);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub fn run_failure(&self, args: &[&str], api_url: &str) -> String {
        let output = self.run(args, api_url);
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
