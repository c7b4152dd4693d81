//! Shared testing utilities for serpent CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated home, working directory and kubeconfig.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(root.path().join(".kube")).expect("Failed to create .kube directory");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory CLI invocations run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// `~/.kube/config` inside the emulated home.
    pub fn kubeconfig_path(&self) -> PathBuf {
        self.home().join(".kube").join("config")
    }

    /// Build a command for the compiled `serpent` binary with no ambient cluster credentials.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("serpent").expect("Failed to locate serpent binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.home())
            .env_remove("KUBECONFIG")
            .env_remove("KUBERNETES_SERVICE_HOST")
            .env_remove("KUBERNETES_SERVICE_PORT")
            .env_remove("SERPENT_LOG");
        cmd
    }

    /// Write `~/.kube/config` with a single `test` context pointing at `server`.
    pub fn write_kubeconfig(&self, server: &str) {
        let content = format!(
            r#"apiVersion: v1
kind: Config
current-context: test
clusters:
  - name: test-cluster
    cluster:
      server: {server}
contexts:
  - name: test
    context:
      cluster: test-cluster
      user: test-user
users:
  - name: test-user
    user:
      token: test-token
"#
        );
        fs::write(self.kubeconfig_path(), content).expect("Failed to write kubeconfig");
    }

    /// Write a config file into the work directory and return its path.
    pub fn write_config(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(file_name);
        fs::write(&path, content).expect("Failed to write config file");
        path
    }
}
