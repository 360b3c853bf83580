#![forbid(unsafe_code)]

//! The blocking REST client.
//!
//! # Failure policy
//!
//! | Operation        | On failure                                    |
//! |------------------|-----------------------------------------------|
//! | `try_fetch_*`    | `Err(ClientError)`                            |
//! | `fetch_*`        | `warn` log + empty list (never surfaced)      |
//! | `submit`/`update`| `Err(ClientError)`, no retry                  |

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use cbam_core::{CountryOption, ElectricitySource, IndustryGroup};

use crate::error::{ClientError, Result};

/// `GET` path for the country reference list.
pub const COUNTRIES_PATH: &str = "/api/cbam/countries";
/// `GET` path for the industry/goods/route/precursor tree.
pub const GOODS_PATH: &str = "/api/cbam/goods";
/// `GET` path for the electricity-source reference list.
pub const ELECTRICITY_PATH: &str = "/api/cbam/srcefelectricitys";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint and timeout configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config with default timeouts. The base URL keeps no trailing
    /// slash so paths can be appended verbatim.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Country entry as served on the wire; mapped into [`CountryOption`]
/// at the client boundary.
#[derive(Debug, Deserialize)]
struct WireCountry {
    id: i64,
    name: String,
    #[serde(default)]
    abbreviation: String,
}

/// Blocking client for the compliance backend.
#[derive(Debug)]
pub struct CbamClient {
    http: Client,
    config: ClientConfig,
}

impl CbamClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url,
            });
        }
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), path));
        }
        let body = response.text()?;
        let parsed = serde_json::from_str(&body)?;
        debug!(path, bytes = body.len(), "reference fetch ok");
        Ok(parsed)
    }

    /// Country reference list, mapped to label/value/abbreviation.
    pub fn try_fetch_countries(&self) -> Result<Vec<CountryOption>> {
        let wire: Vec<WireCountry> = self.get_json(COUNTRIES_PATH)?;
        Ok(wire
            .into_iter()
            .map(|country| CountryOption {
                label: country.name,
                value: country.id,
                abbreviation: country.abbreviation,
            })
            .collect())
    }

    /// Full industry/goods/route/precursor tree.
    pub fn try_fetch_goods_tree(&self) -> Result<Vec<IndustryGroup>> {
        self.get_json(GOODS_PATH)
    }

    /// Electricity-source reference list.
    pub fn try_fetch_electricity_sources(&self) -> Result<Vec<ElectricitySource>> {
        self.get_json(ELECTRICITY_PATH)
    }

    /// Recovering variant: a failed load yields an empty list, so the
    /// dependent dropdowns show no options rather than crashing.
    #[must_use]
    pub fn fetch_countries(&self) -> Vec<CountryOption> {
        self.try_fetch_countries()
            .unwrap_or_else(|error| recover(COUNTRIES_PATH, &error))
    }

    #[must_use]
    pub fn fetch_goods_tree(&self) -> Vec<IndustryGroup> {
        self.try_fetch_goods_tree()
            .unwrap_or_else(|error| recover(GOODS_PATH, &error))
    }

    #[must_use]
    pub fn fetch_electricity_sources(&self) -> Vec<ElectricitySource> {
        self.try_fetch_electricity_sources()
            .unwrap_or_else(|error| recover(ELECTRICITY_PATH, &error))
    }

    /// `POST` a form payload. Non-2xx is an error; there is no retry and
    /// no partial-success handling.
    pub fn submit(&self, path: &str, payload: &Value) -> Result<()> {
        let response = self
            .http
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), path));
        }
        debug!(path, "submission accepted");
        Ok(())
    }

    /// `PUT` an updated form payload; same failure policy as [`submit`](Self::submit).
    pub fn update(&self, path: &str, payload: &Value) -> Result<()> {
        let response = self
            .http
            .put(self.url(path))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api(status.as_u16(), path));
        }
        Ok(())
    }
}

fn recover<T>(path: &str, error: &ClientError) -> Vec<T> {
    warn!(path, %error, "reference fetch failed; substituting empty list");
    Vec::new()
}
