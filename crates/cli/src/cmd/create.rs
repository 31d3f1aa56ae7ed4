//! Implementation of the `binstubs create` command.
//!
//! Creates one binstub per app in a family (`acme`, `acme-*`), or a single
//! one-off binstub with `--as`.

use anyhow::{Context, Result, bail};

use binstubs_lib::consts::RESERVED_REMOTE;
use binstubs_lib::inventory::{AppInventory, RemoteInventory, sorted_apps};
use binstubs_lib::resolve::{default_candidates, resolve_family, resolve_single};
use binstubs_lib::{AppName, ShimName, StubTarget};

use super::{Session, WriteReport, write_targets};
use crate::output::print_json;

/// Arguments shared by `create` and `setup`.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
  /// Family basename, or the app when `as_name` is set.
  pub basename: Option<String>,
  pub app: Option<String>,
  pub as_name: Option<String>,
}

/// Work out which binstubs a create request asks for.
pub fn resolve_request(
  request: &CreateRequest,
  session: &Session,
  apps: &dyn AppInventory,
  remotes: &dyn RemoteInventory,
) -> Result<Vec<StubTarget>> {
  if let Some(stub) = &request.as_name {
    let app = match request.basename.as_ref().or(request.app.as_ref()) {
      Some(app) => AppName::new(app.as_str())?,
      None => remotes
        .list_remotes()
        .context("Failed to read Git remotes")?
        .remove(RESERVED_REMOTE)
        .context("No app specified. Pass an app name or use --app APP.")?,
    };
    let target = resolve_single(app, ShimName::new(stub.as_str())?, session.naming)?;
    return Ok(vec![target]);
  }

  let candidates = match request.basename.as_ref().or(request.app.as_ref()) {
    Some(basename) => vec![basename.clone()],
    None => default_candidates(&session.config.cwd),
  };

  let inventory = sorted_apps(apps).context("Failed to list apps")?;
  Ok(resolve_family(&inventory, &candidates, session.naming)?)
}

/// Resolve and write. Returns the resolved targets along with what was written.
pub fn create(
  request: &CreateRequest,
  session: &Session,
  apps: &dyn AppInventory,
  remotes: &dyn RemoteInventory,
) -> Result<(Vec<StubTarget>, WriteReport)> {
  let targets = resolve_request(request, session, apps, remotes)?;
  if targets.is_empty() {
    bail!("No binstubs to create.");
  }

  let report = write_targets(session, &session.store(), &targets)?;
  Ok((targets, report))
}

/// Execute the create command.
pub fn cmd_create(
  request: &CreateRequest,
  session: &Session,
  apps: &dyn AppInventory,
  remotes: &dyn RemoteInventory,
) -> Result<()> {
  let (_, report) = create(request, session, apps, remotes)?;

  if session.output.is_json() {
    print_json(&report)?;
  }

  Ok(())
}
