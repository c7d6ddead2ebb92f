//! MTR journey API HTTP client.
//!
//! Every request waits out a cooldown since the previous one, to stay
//! polite to the upstream API, and is retried a bounded number of times.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{Network, StationId};

use super::error::FetchError;
use super::types::{HeavyRailRoute, LightRailRoute};

/// Default base URL for the journey planner API.
const DEFAULT_JOURNEY_BASE_URL: &str = "https://www.mtr.com.hk/share/customer/jp/api";

/// Default base URL for the open-data station lists.
const DEFAULT_OPEN_DATA_BASE_URL: &str = "https://opendata.mtr.com.hk/data";

/// The journey API rejects obviously scripted clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

/// Default pause between consecutive requests.
const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1500);

/// Default number of attempts per request, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Configuration for the MTR client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL for `HRRoutes` / `LRRoute`
    pub journey_base_url: String,
    /// Base URL for the station list CSVs
    pub open_data_base_url: String,
    /// Minimum time between the start of two requests
    pub cooldown: Duration,
    /// Attempts per request before giving up
    pub max_attempts: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl FetchConfig {
    /// Create a config pointing at the production endpoints.
    pub fn new() -> Self {
        Self {
            journey_base_url: DEFAULT_JOURNEY_BASE_URL.to_string(),
            open_data_base_url: DEFAULT_OPEN_DATA_BASE_URL.to_string(),
            cooldown: DEFAULT_COOLDOWN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout_secs: 50,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom journey API base URL (for testing).
    pub fn with_journey_base_url(mut self, url: impl Into<String>) -> Self {
        self.journey_base_url = url.into();
        self
    }

    /// Set a custom open-data base URL (for testing).
    pub fn with_open_data_base_url(mut self, url: impl Into<String>) -> Self {
        self.open_data_base_url = url.into();
        self
    }

    /// Set the pause between requests.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the attempt budget per request.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MTR journey API client.
///
/// Clones share the same cooldown clock.
#[derive(Debug, Clone)]
pub struct MtrClient {
    http: reqwest::Client,
    journey_base_url: String,
    open_data_base_url: String,
    cooldown: Duration,
    max_attempts: u32,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl MtrClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json,text/csv,text/plain;q=0.9,*/*;q=0.8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            journey_base_url: config.journey_base_url,
            open_data_base_url: config.open_data_base_url,
            cooldown: config.cooldown,
            max_attempts: config.max_attempts.max(1),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// URL of the station list for a network.
    pub fn dataset_url(&self, network: Network) -> String {
        format!("{}/{}", self.open_data_base_url, network.dataset_file())
    }

    /// URL of the journey API for one origin/destination pair.
    pub fn route_url(&self, network: Network, origin: StationId, destination: StationId) -> String {
        format!(
            "{}/{}/?o={}&d={}&lang=E",
            self.journey_base_url,
            network.route_endpoint(),
            origin,
            destination
        )
    }

    /// Fetch a text resource such as a station list.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.retrying(url, || async move {
            let body = self.get_once(url).await?;
            Ok(body.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(body))
        })
        .await
    }

    /// Fetch and decode a JSON resource.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        self.retrying(url, || async move {
            let body = self.get_once(url).await?;
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })
        })
        .await
    }

    /// Fetch the heavy rail first/last train record for a pair.
    pub async fn fetch_heavy_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<HeavyRailRoute, FetchError> {
        let url = self.route_url(Network::HeavyRail, origin, destination);
        self.fetch_json(&url).await
    }

    /// Fetch the light rail first/last train record for a pair.
    pub async fn fetch_light_rail_route(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<LightRailRoute, FetchError> {
        let url = self.route_url(Network::LightRail, origin, destination);
        self.fetch_json(&url).await
    }

    /// Run `attempt` until it succeeds or the attempt budget is spent.
    ///
    /// Each attempt waits for the cooldown first, so retries are spaced out
    /// like ordinary requests.
    async fn retrying<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            self.throttle().await;

            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if attempts >= self.max_attempts => {
                    return Err(FetchError::Exhausted {
                        url: url.to_string(),
                        attempts,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    warn!(url, attempt = attempts, max_attempts = self.max_attempts, error = %e, "request failed, retrying");
                }
            }
        }
    }

    /// Wait until the cooldown since the previous request has passed.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.cooldown).await;
        }
        *last = Some(Instant::now());
    }

    async fn get_once(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }
}
