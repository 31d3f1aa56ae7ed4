//! Implementation of the `binstubs remotes` command.
//!
//! Creates one binstub per Git remote that points at an app, named after the
//! remote.

use anyhow::{Context, Result};

use binstubs_lib::inventory::RemoteInventory;
use binstubs_lib::resolve::resolve_remotes;

use super::{Session, write_targets};
use crate::output::{print_info, print_json};

pub fn cmd_remotes(session: &Session, remotes: &dyn RemoteInventory) -> Result<()> {
  let remotes = remotes.list_remotes().context("Failed to read Git remotes")?;
  let resolution = resolve_remotes(&remotes)?;
  let store = session.store();

  for alias in &resolution.skipped {
    if !session.output.is_json() {
      print_info(&format!("{} would be recursive: skipping", store.dir().join(alias).display()));
    }
  }

  let mut report = write_targets(session, &store, &resolution.targets)?;
  report.skipped = resolution.skipped;

  if session.output.is_json() {
    print_json(&report)?;
  }

  Ok(())
}
