//! Git remotes as app bindings.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use gix::remote::Direction;
use tracing::{debug, info, warn};

use super::{InventoryError, RemoteBinder, RemoteInventory};
use crate::types::AppName;

/// Extract the app from a remote URL pointing at `host`.
///
/// Recognizes `git@HOST:APP.git`, `ssh://git@HOST/APP.git` and
/// `https://git.HOST/APP.git`.
pub fn app_from_remote_url(url: &str, host: &str) -> Option<AppName> {
  let scp = format!("git@{host}:");
  let ssh = format!("ssh://git@{host}/");
  let https = format!("https://git.{host}/");

  let path = url
    .strip_prefix(&scp)
    .or_else(|| url.strip_prefix(&ssh))
    .or_else(|| url.strip_prefix(&https))?;
  let app = path.strip_suffix(".git").unwrap_or(path);

  if app.is_empty() || !app.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
    return None;
  }
  AppName::new(app).ok()
}

/// Remotes of the repository containing `cwd`.
pub struct GitRemotes {
  cwd: PathBuf,
  host: String,
}

impl GitRemotes {
  pub fn new(cwd: impl Into<PathBuf>, host: impl Into<String>) -> Self {
    Self {
      cwd: cwd.into(),
      host: host.into(),
    }
  }
}

impl RemoteInventory for GitRemotes {
  fn list_remotes(&self) -> Result<BTreeMap<String, AppName>, InventoryError> {
    let mut remotes = BTreeMap::new();

    let repo = match gix::discover(&self.cwd) {
      Ok(repo) => repo,
      Err(e) => {
        debug!(cwd = %self.cwd.display(), error = %e, "not inside a git repository");
        return Ok(remotes);
      }
    };

    for name in repo.remote_names() {
      let remote = match repo.find_remote(&*name) {
        Ok(remote) => remote,
        Err(e) => {
          warn!(remote = %name, error = %e, "failed to read remote");
          continue;
        }
      };

      let Some(url) = remote.url(Direction::Fetch) else {
        continue;
      };
      let url = url.to_bstring().to_string();

      match app_from_remote_url(&url, &self.host) {
        Some(app) => {
          debug!(remote = %name, app = %app, "found app remote");
          remotes.insert(name.to_string(), app);
        }
        None => debug!(remote = %name, url = %url, "remote does not point at an app"),
      }
    }

    Ok(remotes)
  }
}

/// Adds remotes by running `git remote add` in `cwd`.
///
/// Outside a repository there is nothing to bind and every add is a no-op.
pub struct GitCli {
  cwd: PathBuf,
}

impl GitCli {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: cwd.into() }
  }

  fn git(&self, args: &[&str]) -> Result<String, InventoryError> {
    let command = args.join(" ");
    let output = Command::new("git")
      .args(args)
      .current_dir(&self.cwd)
      .output()
      .map_err(|e| InventoryError::Git {
        command: command.clone(),
        message: e.to_string(),
      })?;

    if !output.status.success() {
      return Err(InventoryError::Git {
        command,
        message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}

impl RemoteBinder for GitCli {
  fn add_remote(&self, name: &str, url: &str) -> Result<bool, InventoryError> {
    if let Err(e) = gix::discover(&self.cwd) {
      debug!(cwd = %self.cwd.display(), remote = name, error = %e, "not inside a git repository, skipping remote");
      return Ok(false);
    }

    let existing = self.git(&["remote"])?;
    if existing.lines().any(|line| line.trim() == name) {
      debug!(remote = name, "remote already exists");
      return Ok(false);
    }

    self.git(&["remote", "add", name, url])?;
    info!(remote = name, url, "added git remote");
    Ok(true)
  }
}
