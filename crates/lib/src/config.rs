//! Runtime configuration gathered from the environment.
//!
//! Nothing else in the crate reads environment variables or the working
//! directory; the CLI builds a [`Config`] once and passes it down.

use std::path::{Path, PathBuf};

use crate::consts::{API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_BIN_DIR, DEFAULT_HOST, HOST_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Base URL of the platform API serving the app inventory.
  pub api_url: String,
  pub api_key: Option<String>,
  /// Host used in Git remote URLs.
  pub host: String,
  pub cwd: PathBuf,
}

impl Config {
  pub fn from_env(cwd: PathBuf) -> Self {
    let api_url = std::env::var(API_URL_ENV)
      .ok()
      .filter(|v| !v.is_empty())
      .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_key = std::env::var(API_KEY_ENV).ok().filter(|v| !v.is_empty());
    let host = std::env::var(HOST_ENV)
      .ok()
      .filter(|v| !v.is_empty())
      .unwrap_or_else(|| DEFAULT_HOST.to_string());

    Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      api_key,
      host,
      cwd,
    }
  }

  /// Git remote URL for `app`.
  pub fn git_url(&self, app: &str) -> String {
    format!("git@{}:{}.git", self.host, app)
  }
}

/// The binstub directory: `dir` as given, or `bin`.
///
/// Relative paths are kept relative so reported paths read like `bin/staging`.
pub fn bin_dir(dir: Option<&Path>) -> PathBuf {
  dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_BIN_DIR))
}
