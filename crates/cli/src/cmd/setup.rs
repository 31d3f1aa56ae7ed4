//! Implementation of the `binstubs setup` command.
//!
//! Runs `create`, then adds a Git remote for every resolved binstub pointing at
//! its app. Remotes are named like the binstub, or after `--as` when given.

use anyhow::{Context, Result};
use serde::Serialize;

use binstubs_lib::ShimName;
use binstubs_lib::inventory::{AppInventory, RemoteBinder, RemoteInventory};

use super::Session;
use super::create::{CreateRequest, create};
use crate::output::{print_json, print_success};

#[derive(Debug, Serialize)]
struct RemoteReport {
  name: String,
  url: String,
  added: bool,
}

/// `--as` names the remote even when `--full` renamed the binstub.
fn remote_name<'a>(request: &'a CreateRequest, stub: &'a ShimName) -> &'a str {
  request.as_name.as_deref().unwrap_or(stub.as_str())
}

pub fn cmd_setup(
  request: &CreateRequest,
  session: &Session,
  apps: &dyn AppInventory,
  remotes: &dyn RemoteInventory,
  binder: &dyn RemoteBinder,
) -> Result<()> {
  let (targets, report) = create(request, session, apps, remotes)?;

  let mut bound = Vec::new();
  for target in &targets {
    let name = remote_name(request, &target.name);
    let url = session.config.git_url(target.app.as_str());
    let added = binder
      .add_remote(name, &url)
      .with_context(|| format!("Failed to add Git remote {name}"))?;

    if added && !session.output.is_json() {
      print_success(&format!("Git remote {name} added"));
    }
    bound.push(RemoteReport {
      name: name.to_string(),
      url,
      added,
    });
  }

  if session.output.is_json() {
    print_json(&serde_json::json!({ "binstubs": report, "remotes": bound }))?;
  }

  Ok(())
}
