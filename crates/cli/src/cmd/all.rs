//! Implementation of the `binstubs all` command.

use anyhow::{Context, Result};

use binstubs_lib::Naming;
use binstubs_lib::inventory::{AppInventory, sorted_apps};
use binstubs_lib::resolve::resolve_all;

use super::{Session, write_targets_as};
use crate::output::{print_info, print_json};

/// Create a binstub named after each app starting with `prefix`.
///
/// Always uses full app names, whatever `--full` says.
pub fn cmd_all(session: &Session, apps: &dyn AppInventory, prefix: Option<&str>) -> Result<()> {
  let inventory = sorted_apps(apps).context("Failed to list apps")?;
  let targets = resolve_all(&inventory, prefix.unwrap_or_default())?;

  if targets.is_empty() && !session.output.is_json() {
    print_info("No matching apps.");
  }

  let report = write_targets_as(session, &session.store(), &targets, Naming::Full)?;

  if session.output.is_json() {
    print_json(&report)?;
  }

  Ok(())
}
