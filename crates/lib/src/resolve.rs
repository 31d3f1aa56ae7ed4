//! Mapping app inventories to binstub names.
//!
//! Apps are grouped into families by name: `acme` is the root and `acme-staging`,
//! `acme-qa` are its members. A family's binstubs are named after the member
//! suffix (`staging`, `qa`) and the root itself becomes `production`.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::consts::{PRODUCTION, RESERVED_REMOTE};
use crate::types::{AppName, NameError, Naming, ShimName, StubTarget};

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("Couldn't find any apps named {name} or {name}-*.")]
  NoMatchingApps { name: String },

  #[error("no basename candidates given")]
  NoCandidates,

  #[error("No Git remotes found.")]
  NoRemotesFound,

  #[error(transparent)]
  Name(#[from] NameError),
}

/// Outcome of resolving Git remote aliases.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemoteResolution {
  pub targets: Vec<StubTarget>,
  /// Aliases that would make a binstub invoke itself.
  pub skipped: Vec<String>,
}

/// Whether `app` is `root` or `root-<anything>`.
fn in_family(app: &str, root: &str) -> bool {
  match app.strip_prefix(root) {
    Some(rest) => rest.is_empty() || rest.starts_with('-'),
    None => false,
  }
}

/// Candidate family roots for a working directory.
///
/// The directory leaf has `_` turned into `-` and is cut at the first `.`
/// (`acme_web.git` becomes `acme-web`). The same name with hyphens removed is
/// tried second.
pub fn default_candidates(cwd: &Path) -> Vec<String> {
  let leaf = cwd
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  let translated = leaf.replace('_', "-");
  let basename = translated.split('.').next().unwrap_or_default().to_string();

  let squashed = basename.replace('-', "");
  let mut candidates = vec![basename];
  if !candidates.contains(&squashed) {
    candidates.push(squashed);
  }
  candidates
}

/// Resolve the family of the first candidate that matches anything in `inventory`.
///
/// Candidates are tried in order and the first hit wins, even if a later
/// candidate would match more apps.
pub fn resolve_family<S: AsRef<str>>(
  inventory: &[AppName],
  candidates: &[S],
  naming: Naming,
) -> Result<Vec<StubTarget>, ResolveError> {
  let first = candidates.first().ok_or(ResolveError::NoCandidates)?.as_ref();

  let root = candidates
    .iter()
    .map(|c| c.as_ref())
    .find(|c| !c.is_empty() && inventory.iter().any(|app| in_family(app.as_str(), c)))
    .ok_or_else(|| ResolveError::NoMatchingApps { name: first.to_string() })?;

  debug!(root, "selected app family");

  let mut targets = Vec::new();
  for app in inventory.iter().filter(|app| in_family(app.as_str(), root)) {
    let name = if naming.is_full() {
      ShimName::try_from(app)
    } else {
      match app.as_str()[root.len()..].strip_prefix('-') {
        None => ShimName::new(PRODUCTION),
        Some(suffix) => ShimName::new(suffix),
      }
    };

    match name {
      Ok(name) => targets.push(StubTarget::new(app.clone(), name)),
      Err(e) => warn!(app = %app, error = %e, "skipping app without a usable binstub name"),
    }
  }

  Ok(targets)
}

/// A single binstub named `name`, or after the app in full-name mode.
pub fn resolve_single(app: AppName, name: ShimName, naming: Naming) -> Result<StubTarget, ResolveError> {
  let name = if naming.is_full() { ShimName::try_from(&app)? } else { name };
  Ok(StubTarget::new(app, name))
}

/// Every app starting with `prefix`, each named after itself.
pub fn resolve_all(inventory: &[AppName], prefix: &str) -> Result<Vec<StubTarget>, ResolveError> {
  inventory
    .iter()
    .filter(|app| app.as_str().starts_with(prefix))
    .map(|app| -> Result<StubTarget, ResolveError> { Ok(StubTarget::new(app.clone(), ShimName::try_from(app)?)) })
    .collect()
}

/// One binstub per remote alias, named after the alias.
///
/// The alias reserved for the wrapped client is skipped: a binstub with that
/// name would shadow the client and invoke itself.
pub fn resolve_remotes(remotes: &BTreeMap<String, AppName>) -> Result<RemoteResolution, ResolveError> {
  if remotes.is_empty() {
    return Err(ResolveError::NoRemotesFound);
  }

  let mut resolution = RemoteResolution::default();

  for (alias, app) in remotes {
    if alias == RESERVED_REMOTE {
      debug!(alias = %alias, "skipping recursive remote");
      resolution.skipped.push(alias.clone());
      continue;
    }
    resolution
      .targets
      .push(StubTarget::new(app.clone(), ShimName::new(alias.as_str())?));
  }

  Ok(resolution)
}
