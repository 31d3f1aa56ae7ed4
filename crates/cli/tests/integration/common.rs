//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

pub const API_KEY: &str = "test-key";

/// Isolated test environment.
///
/// Each test gets its own working directory and its own mock app inventory.
pub struct TestEnv {
  pub temp: TempDir,
  pub server: ServerGuard,
  mocks: Vec<Mock>,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
      server: mockito::Server::new(),
      mocks: Vec::new(),
    }
  }

  /// Serve `apps` as the inventory for authenticated requests.
  pub fn with_apps(mut self, apps: &[&str]) -> Self {
    let body: Vec<_> = apps.iter().map(|name| serde_json::json!({ "name": name })).collect();
    let mock = self
      .server
      .mock("GET", "/apps")
      .match_header("authorization", format!("Bearer {API_KEY}").as_str())
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(serde_json::Value::Array(body).to_string())
      .create();
    self.mocks.push(mock);
    self
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn bin(&self, name: &str) -> PathBuf {
    self.path().join("bin").join(name)
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.path().join(relative_path)).unwrap()
  }

  /// Get a pre-configured Command for the binstubs binary.
  ///
  /// Runs inside the temp directory with the API pointed at the mock server.
  pub fn binstubs_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("binstubs");
    cmd.current_dir(self.path());
    cmd.env("HEROKU_API_URL", self.server.url());
    cmd.env("HEROKU_API_KEY", API_KEY);
    cmd.env_remove("HEROKU_HOST");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run `git` in the temp directory. Returns false when git is unavailable.
  pub fn git(&self, args: &[&str]) -> bool {
    StdCommand::new("git")
      .args(args)
      .current_dir(self.path())
      .output()
      .is_ok_and(|o| o.status.success())
  }
}

/// Expected body of a binstub for `app`.
pub fn stub_body(app: &str) -> String {
  format!("#!/bin/sh\nHEROKU_APP={app} HKAPP={app} exec \"${{HEROKU_COMMAND:-heroku}}\" \"$@\"\n")
}
