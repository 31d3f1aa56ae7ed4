//! Binstubs on disk.
//!
//! A [`BinstubStore`] owns one directory. Only files that decode under its
//! [`ShimFormat`] are ever overwritten or deleted; anything else in the directory
//! is left alone.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::codec::ShimFormat;
use crate::consts::READ_CAP;
use crate::types::{AppName, Naming, ShimName, StubTarget};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("No binstubs found.")]
  NoBinstubsFound { dir: PathBuf },

  #[error("{}: not a binstub, refusing to delete", path.display())]
  NotOwned { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to read directory {}: {source}", path.display())]
  ReadDir { path: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: io::Error },

  #[error("failed to set permissions on {}: {source}", path.display())]
  SetPermissions { path: PathBuf, source: io::Error },

  #[error("failed to delete {}: {source}", path.display())]
  Delete { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Name(#[from] crate::types::NameError),
}

/// An owned binstub found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binstub {
  pub path: PathBuf,
  pub app: AppName,
}

/// Result of [`BinstubStore::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
  Written(Binstub),
  /// A file we do not own already sits at the target path; it was left untouched.
  Conflict(PathBuf),
}

pub struct BinstubStore {
  dir: PathBuf,
  format: ShimFormat,
}

impl BinstubStore {
  pub fn new(dir: impl Into<PathBuf>, format: ShimFormat) -> Self {
    Self {
      dir: dir.into(),
      format,
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn format(&self) -> &ShimFormat {
    &self.format
  }

  pub fn path_for(&self, name: &ShimName) -> PathBuf {
    self.dir.join(name.as_str())
  }

  /// Decode `path` if it is one of ours.
  ///
  /// Missing, unreadable, oversized and non-regular files are all treated as
  /// not owned.
  pub fn read(&self, path: &Path) -> Option<AppName> {
    if !path.is_file() {
      return None;
    }

    let file = match File::open(path) {
      Ok(f) => f,
      Err(e) => {
        debug!(path = %path.display(), error = %e, "unreadable file, not a binstub");
        return None;
      }
    };

    let mut buf = Vec::with_capacity(READ_CAP + 1);
    if let Err(e) = file.take(READ_CAP as u64 + 1).read_to_end(&mut buf) {
      debug!(path = %path.display(), error = %e, "failed to read file, not a binstub");
      return None;
    }
    if buf.len() > READ_CAP {
      return None;
    }

    self.format.decode(&buf)
  }

  /// Write a binstub for `app` named `name` (or after the app in full-name mode).
  ///
  /// Creates the directory when missing. An existing file is replaced only if it
  /// is itself a binstub.
  pub fn write(&self, app: &AppName, name: &ShimName, naming: Naming) -> Result<WriteOutcome, StoreError> {
    fs::create_dir_all(&self.dir).map_err(|e| StoreError::CreateDir {
      path: self.dir.clone(),
      source: e,
    })?;

    let name = if naming.is_full() { ShimName::try_from(app)? } else { name.clone() };
    let path = self.path_for(&name);

    if path.symlink_metadata().is_ok() && self.read(&path).is_none() {
      debug!(path = %path.display(), "existing file is not a binstub, not overwriting");
      return Ok(WriteOutcome::Conflict(path));
    }

    fs::write(&path, self.format.encode(app)).map_err(|e| StoreError::WriteFile {
      path: path.clone(),
      source: e,
    })?;
    make_executable(&path)?;

    info!(path = %path.display(), app = %app, "wrote binstub");
    Ok(WriteOutcome::Written(Binstub {
      path,
      app: app.clone(),
    }))
  }

  /// Write each target in order, stopping at the first filesystem error.
  pub fn write_all<'a, I>(&self, targets: I, naming: Naming) -> Result<Vec<WriteOutcome>, StoreError>
  where
    I: IntoIterator<Item = &'a StubTarget>,
  {
    targets
      .into_iter()
      .map(|t| self.write(&t.app, &t.name, naming))
      .collect()
  }

  /// Lazily walk the directory in path order, yielding owned binstubs.
  ///
  /// Hidden entries (names starting with `.`) are never candidates. Each call
  /// re-reads the directory.
  pub fn entries(&self) -> Result<Entries<'_>, StoreError> {
    let mut paths = match fs::read_dir(&self.dir) {
      Ok(rd) => rd
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::ReadDir {
          path: self.dir.clone(),
          source: e,
        })?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
      Err(e) => {
        return Err(StoreError::ReadDir {
          path: self.dir.clone(),
          source: e,
        });
      }
    };
    paths.retain(|path| !is_hidden(path));
    paths.sort();

    Ok(Entries {
      store: self,
      paths: paths.into_iter(),
    })
  }

  /// All owned binstubs, failing when there are none.
  pub fn scan(&self) -> Result<Vec<Binstub>, StoreError> {
    let stubs: Vec<Binstub> = self.entries()?.collect();
    if stubs.is_empty() {
      return Err(StoreError::NoBinstubsFound { dir: self.dir.clone() });
    }
    Ok(stubs)
  }

  /// Remove a binstub previously returned by [`scan`](Self::scan).
  ///
  /// Ownership is checked again right before unlinking.
  pub fn delete(&self, stub: &Binstub) -> Result<PathBuf, StoreError> {
    if self.read(&stub.path).is_none() {
      return Err(StoreError::NotOwned {
        path: stub.path.clone(),
      });
    }

    fs::remove_file(&stub.path).map_err(|e| StoreError::Delete {
      path: stub.path.clone(),
      source: e,
    })?;

    info!(path = %stub.path.display(), app = %stub.app, "deleted binstub");
    Ok(stub.path.clone())
  }
}

/// Iterator returned by [`BinstubStore::entries`].
pub struct Entries<'a> {
  store: &'a BinstubStore,
  paths: std::vec::IntoIter<PathBuf>,
}

impl Iterator for Entries<'_> {
  type Item = Binstub;

  fn next(&mut self) -> Option<Self::Item> {
    for path in self.paths.by_ref() {
      match self.store.read(&path) {
        Some(app) => return Some(Binstub { path, app }),
        None => debug!(path = %path.display(), "skipping non-binstub"),
      }
    }
    None
  }
}

fn is_hidden(path: &Path) -> bool {
  path
    .file_name()
    .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), StoreError> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| StoreError::SetPermissions {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), StoreError> {
  Ok(())
}
