//! Implementation of the `binstubs clean` command.
//!
//! Deletes every binstub in the directory. Other files are never touched.

use anyhow::Result;

use super::Session;
use crate::output::print_json;

pub fn cmd_clean(session: &Session) -> Result<()> {
  let store = session.store();
  let mut deleted = Vec::new();

  for stub in store.scan()? {
    let path = store.delete(&stub)?;
    if !session.output.is_json() {
      println!("{} deleted", path.display());
    }
    deleted.push(path);
  }

  if session.output.is_json() {
    print_json(&serde_json::json!({ "deleted": deleted }))?;
  }

  Ok(())
}
