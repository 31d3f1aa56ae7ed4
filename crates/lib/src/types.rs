//! Value types shared by the codec, resolver and store.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating app or shim names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
  #[error("app name is empty")]
  EmptyApp,

  #[error("unsupported app name '{0}': whitespace and quotes are not allowed")]
  UnsupportedApp(String),

  #[error("binstub name is empty")]
  EmptyShim,

  #[error("invalid binstub name '{0}': must be a single path component")]
  InvalidShim(String),
}

/// The name of a remote app.
///
/// Names are embedded unescaped in the shim body, so anything that would need
/// shell quoting (whitespace, quote characters) is rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
  pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
    let name = name.into();
    if name.is_empty() {
      return Err(NameError::EmptyApp);
    }
    if name.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
      return Err(NameError::UnsupportedApp(name));
    }
    Ok(Self(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for AppName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for AppName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for AppName {
  type Error = NameError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<AppName> for String {
  fn from(value: AppName) -> Self {
    value.0
  }
}

/// File name of a binstub inside its directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShimName(String);

impl ShimName {
  pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
    let name = name.into();
    if name.is_empty() {
      return Err(NameError::EmptyShim);
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
      return Err(NameError::InvalidShim(name));
    }
    Ok(Self(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ShimName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl TryFrom<&AppName> for ShimName {
  type Error = NameError;

  fn try_from(app: &AppName) -> Result<Self, Self::Error> {
    Self::new(app.as_str())
  }
}

/// How a binstub is named on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Naming {
  /// Use the name computed by the resolver (suffix, alias, or `--as` name).
  #[default]
  Short,
  /// Use the full app name.
  Full,
}

impl Naming {
  pub fn from_full_flag(full: bool) -> Self {
    if full { Naming::Full } else { Naming::Short }
  }

  pub fn is_full(self) -> bool {
    matches!(self, Naming::Full)
  }
}

/// An app paired with the binstub name it should be written under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StubTarget {
  pub app: AppName,
  pub name: ShimName,
}

impl StubTarget {
  pub fn new(app: AppName, name: ShimName) -> Self {
    Self { app, name }
  }
}
