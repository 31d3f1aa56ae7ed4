//! Implementation of the `binstubs list` command.

use std::path::Path;

use anyhow::Result;

use binstubs_lib::{BinstubStore, ShimFormat};

use super::Session;
use crate::output::{print_binstub, print_json};

/// Print every binstub in the directory as `path -> app`.
///
/// `dir` overrides the session directory.
pub fn cmd_list(session: &Session, dir: Option<&Path>) -> Result<()> {
  let store = match dir {
    Some(dir) => BinstubStore::new(dir, ShimFormat::default()),
    None => session.store(),
  };

  let stubs = store.scan()?;

  if session.output.is_json() {
    print_json(&stubs)?;
  } else {
    for stub in &stubs {
      print_binstub(&stub.path, stub.app.as_str());
    }
  }

  Ok(())
}
