pub const APP_NAME: &str = "binstubs";

/// Directory binstubs are written to when none is given, relative to the working directory.
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Bytes read from a candidate file when deciding ownership.
pub const READ_CAP: usize = 512;

/// Shim name given to the app whose name equals the family root.
pub const PRODUCTION: &str = "production";

/// Git remote alias reserved for the wrapped client itself.
pub const RESERVED_REMOTE: &str = "heroku";

pub const DEFAULT_API_URL: &str = "https://api.heroku.com";
pub const DEFAULT_HOST: &str = "heroku.com";

pub const API_URL_ENV: &str = "HEROKU_API_URL";
pub const API_KEY_ENV: &str = "HEROKU_API_KEY";
pub const HOST_ENV: &str = "HEROKU_HOST";
