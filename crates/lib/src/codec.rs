//! The binstub file format.
//!
//! A binstub is a two-line shell script:
//!
//! ```text
//! #!/bin/sh
//! HEROKU_APP=acme HKAPP=acme exec "${HEROKU_COMMAND:-heroku}" "$@"
//! ```
//!
//! There is no registry of created binstubs, so the file body is the only record
//! of ownership. [`decode`] accepts exactly this shape (modulo blank lines and
//! quoting of the app value) and rejects everything else, which is what keeps
//! `clean` and overwrites away from hand-written scripts.

use crate::types::AppName;

/// Parameters of the textual shim format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimFormat {
  pub shebang: String,
  /// Variable that carries the app name; decoding is anchored on it.
  pub app_key: String,
  /// Second variable set to the same app name.
  pub alt_key: String,
  /// Variable consulted when the shim runs to override the wrapped client.
  pub command_env: String,
  pub default_command: String,
  /// Literal that must follow the app assignment for a file to be owned.
  pub marker: String,
}

impl Default for ShimFormat {
  fn default() -> Self {
    Self {
      shebang: "#!/bin/sh".to_string(),
      app_key: "HEROKU_APP".to_string(),
      alt_key: "HKAPP".to_string(),
      command_env: "HEROKU_COMMAND".to_string(),
      default_command: "heroku".to_string(),
      marker: "heroku".to_string(),
    }
  }
}

impl ShimFormat {
  /// Render the shim body for `app`.
  pub fn encode(&self, app: &AppName) -> String {
    format!(
      "{shebang}\n{key}={app} {alt}={app} exec \"${{{env}:-{cmd}}}\" \"$@\"\n",
      shebang = self.shebang,
      key = self.app_key,
      alt = self.alt_key,
      env = self.command_env,
      cmd = self.default_command,
    )
  }

  /// Recover the app from a shim body, or `None` if the content is not ours.
  ///
  /// Grammar, anchored at both ends of `content`:
  ///
  /// ```text
  /// "#!" <any> "\n"+ KEY "=" ['"]? APP ['"]? " " <any> MARKER <any> "\n"*
  /// ```
  ///
  /// `<any>` never spans a newline, and APP ends at the first space (or at a
  /// quote directly followed by a space).
  pub fn decode(&self, content: &[u8]) -> Option<AppName> {
    let text = std::str::from_utf8(content).ok()?;

    let rest = text.strip_prefix("#!")?;
    let (_, rest) = rest.split_once('\n')?;
    let rest = rest.trim_start_matches('\n');

    let line = rest.trim_end_matches('\n');
    if line.contains('\n') {
      return None;
    }

    let value = line.strip_prefix(self.app_key.as_str())?.strip_prefix('=')?;
    let value = value.strip_prefix(['\'', '"']).unwrap_or(value);

    let (app, tail) = split_value(value)?;
    if !tail.contains(self.marker.as_str()) {
      return None;
    }

    AppName::new(app).ok()
  }
}

/// Split an assignment value at its terminating space, dropping a closing quote.
fn split_value(value: &str) -> Option<(&str, &str)> {
  let bytes = value.as_bytes();
  for (i, &b) in bytes.iter().enumerate() {
    if b == b' ' {
      return Some((&value[..i], &value[i + 1..]));
    }
    if (b == b'\'' || b == b'"') && bytes.get(i + 1) == Some(&b' ') {
      return Some((&value[..i], &value[i + 2..]));
    }
  }
  None
}
