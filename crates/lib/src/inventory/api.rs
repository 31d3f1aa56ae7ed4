//! App inventory from the platform API.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, RANGE, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AppInventory, InventoryError};
use crate::config::Config;
use crate::consts::APP_NAME;
use crate::types::AppName;

const API_MEDIA_TYPE: &str = "application/vnd.heroku+json; version=3";

/// Response header carrying the `Range` of the next page.
const NEXT_RANGE: &str = "Next-Range";

#[derive(Debug, Deserialize)]
struct ApiApp {
  name: String,
}

/// `GET /apps` against the configured API.
pub struct HerokuApi {
  client: Client,
  base_url: String,
  api_key: Option<String>,
}

impl HerokuApi {
  pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.into(),
      api_key,
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(config.api_url.clone(), config.api_key.clone())
  }
}

impl AppInventory for HerokuApi {
  fn list_apps(&self) -> Result<Vec<AppName>, InventoryError> {
    let key = self.api_key.as_deref().ok_or(InventoryError::MissingApiKey)?;
    let url = format!("{}/apps", self.base_url);
    debug!(url = %url, "fetching app inventory");

    let request_err = |source| InventoryError::Request {
      url: url.clone(),
      source,
    };

    let mut apps: Vec<ApiApp> = Vec::new();
    let mut range: Option<String> = None;

    loop {
      let mut request = self
        .client
        .get(&url)
        .header(ACCEPT, API_MEDIA_TYPE)
        .header(USER_AGENT, format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")))
        .bearer_auth(key);
      if let Some(range) = &range {
        request = request.header(RANGE, range.as_str());
      }

      let response = request
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(request_err)?;
      let next = next_range(&response);
      let page: Vec<ApiApp> = response.json().map_err(request_err)?;
      debug!(count = page.len(), range = ?range, "fetched app page");
      apps.extend(page);

      match next {
        Some(next) if range.as_deref() != Some(next.as_str()) => range = Some(next),
        Some(next) => {
          warn!(range = %next, "API repeated the same range, stopping");
          break;
        }
        None => break,
      }
    }

    let apps = apps
      .into_iter()
      .filter_map(|a| match AppName::new(a.name) {
        Ok(app) => Some(app),
        Err(e) => {
          warn!(error = %e, "ignoring app with unsupported name");
          None
        }
      })
      .collect::<Vec<_>>();

    debug!(count = apps.len(), "fetched app inventory");
    Ok(apps)
  }
}

/// The `Next-Range` of a partial response, when more pages follow.
fn next_range(response: &Response) -> Option<String> {
  if response.status() != StatusCode::PARTIAL_CONTENT {
    return None;
  }
  response
    .headers()
    .get(NEXT_RANGE)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string)
}
