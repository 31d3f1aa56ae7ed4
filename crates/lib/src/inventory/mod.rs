//! Sources of app names and Git remotes.
//!
//! The resolver and store never talk to the network or to Git directly; the CLI
//! picks implementations of these traits and hands their output over.

mod api;
mod git;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::AppName;

pub use api::HerokuApi;
pub use git::{GitCli, GitRemotes, app_from_remote_url};

#[derive(Debug, Error)]
pub enum InventoryError {
  #[error("no API key configured: set {}", crate::consts::API_KEY_ENV)]
  MissingApiKey,

  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("git {command} failed: {message}")]
  Git { command: String, message: String },
}

/// Lists the apps the user can access.
pub trait AppInventory {
  fn list_apps(&self) -> Result<Vec<AppName>, InventoryError>;
}

/// Lists Git remote aliases bound to apps.
pub trait RemoteInventory {
  fn list_remotes(&self) -> Result<BTreeMap<String, AppName>, InventoryError>;
}

/// Creates Git remotes.
pub trait RemoteBinder {
  /// Add remote `name` pointing at `url`. Returns `false` when a remote with that
  /// name already exists; it is left unchanged.
  fn add_remote(&self, name: &str, url: &str) -> Result<bool, InventoryError>;
}

/// The inventory sorted and without duplicates.
pub fn sorted_apps(inventory: &dyn AppInventory) -> Result<Vec<AppName>, InventoryError> {
  let mut apps = inventory.list_apps()?;
  apps.sort();
  apps.dedup();
  Ok(apps)
}

/// A fixed app list.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
  apps: Vec<AppName>,
}

impl StaticInventory {
  pub fn new(apps: Vec<AppName>) -> Self {
    Self { apps }
  }
}

impl AppInventory for StaticInventory {
  fn list_apps(&self) -> Result<Vec<AppName>, InventoryError> {
    Ok(self.apps.clone())
  }
}

impl RemoteInventory for BTreeMap<String, AppName> {
  fn list_remotes(&self) -> Result<BTreeMap<String, AppName>, InventoryError> {
    Ok(self.clone())
  }
}
