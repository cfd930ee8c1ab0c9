//! Nominatim place-search HTTP client.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER};
use tokio::sync::Semaphore;
use tracing::trace;

use crate::config::DEFAULT_USER_AGENT;
use crate::domain::GeocodedStop;

use super::Geocoder;
use super::convert::convert_place;
use super::error::GeocodeError;
use super::types::NominatimPlace;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Suffix appended to every stop name to bias results towards stations.
const DEFAULT_QUERY_SUFFIX: &str = "railway station";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the place-search client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of the service (without the `/search` path)
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Optional Referer header
    pub referer: Option<String>,
    /// Text appended to each stop name when querying
    pub query_suffix: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl NominatimConfig {
    /// Create a config pointing at the public Nominatim instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
            timeout_secs: 30,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the Referer header.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set the disambiguating query suffix. An empty suffix sends the stop
    /// name unchanged.
    pub fn with_query_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.query_suffix = suffix.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Nominatim API client.
///
/// Takes only the top-ranked result per query. A semaphore bounds the number
/// of requests in flight so a long stop list does not trip rate limits.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    query_suffix: String,
    semaphore: Arc<Semaphore>,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(referer) = &config.referer {
            let value = HeaderValue::from_str(referer)
                .map_err(|_| GeocodeError::Config(format!("invalid Referer: {referer:?}")))?;
            headers.insert(REFERER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query_suffix: config.query_suffix,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// The free-text query sent for a stop name. The name is used as given.
    pub fn query_for(&self, stop: &str) -> String {
        if self.query_suffix.is_empty() {
            stop.to_string()
        } else {
            format!("{stop} {}", self.query_suffix)
        }
    }

    /// Search for a free-text query and return the top-ranked place, if any.
    pub async fn search_top(&self, query: &str) -> Result<Option<NominatimPlace>, GeocodeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeocodeError::Forbidden);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        trace!(query, results = places.len(), "place search returned");

        Ok(places.into_iter().next())
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, stop: &str) -> Result<GeocodedStop, GeocodeError> {
        let query = self.query_for(stop);
        let place = self
            .search_top(&query)
            .await?
            .ok_or(GeocodeError::NoMatch { query })?;

        Ok(convert_place(&place, stop)?)
    }
}
