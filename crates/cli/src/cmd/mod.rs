mod all;
mod clean;
mod create;
mod list;
mod remotes;
mod setup;

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use binstubs_lib::config::Config;
use binstubs_lib::{Binstub, BinstubStore, Naming, ShimFormat, StubTarget, WriteOutcome};

use crate::output::{OutputFormat, print_binstub, print_warning};

pub use all::cmd_all;
pub use clean::cmd_clean;
pub use create::{CreateRequest, cmd_create};
pub use list::cmd_list;
pub use remotes::cmd_remotes;
pub use setup::cmd_setup;

/// Settings shared by every command.
pub struct Session {
  pub config: Config,
  pub dir: PathBuf,
  pub naming: Naming,
  pub output: OutputFormat,
}

impl Session {
  pub fn store(&self) -> BinstubStore {
    BinstubStore::new(&self.dir, ShimFormat::default())
  }
}

/// What a batch of writes did, for JSON output.
#[derive(Debug, Default, Serialize)]
pub struct WriteReport {
  pub written: Vec<Binstub>,
  pub conflicts: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub skipped: Vec<String>,
}

/// Write `targets` in order, reporting each outcome as it happens.
///
/// Conflicts are reported and skipped; the first filesystem error aborts the batch.
pub fn write_targets(session: &Session, store: &BinstubStore, targets: &[StubTarget]) -> Result<WriteReport> {
  write_targets_as(session, store, targets, session.naming)
}

pub fn write_targets_as(
  session: &Session,
  store: &BinstubStore,
  targets: &[StubTarget],
  naming: Naming,
) -> Result<WriteReport> {
  let mut report = WriteReport::default();

  for target in targets {
    match store.write(&target.app, &target.name, naming)? {
      WriteOutcome::Written(stub) => {
        if !session.output.is_json() {
          print_binstub(&stub.path, stub.app.as_str());
        }
        report.written.push(stub);
      }
      WriteOutcome::Conflict(path) => {
        if !session.output.is_json() {
          print_warning(&format!("{} exists: not overwriting", path.display()));
        }
        report.conflicts.push(path);
      }
    }
  }

  Ok(report)
}
