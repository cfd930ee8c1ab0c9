//! Overpass API HTTP client.
//!
//! Posts a single Overpass QL query per route request and returns the raw
//! element list. No caching: every route request sees fresh data.

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tracing::{debug, warn};

use crate::config::DEFAULT_USER_AGENT;
use crate::domain::BoundingBox;

use super::RailNetworkProvider;
use super::error::OverpassError;
use super::query::rail_ways_query;
use super::types::OverpassResponse;

/// Default Overpass interpreter endpoint.
const DEFAULT_INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default server-side query timeout (the `[timeout:N]` setting).
const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Full URL of the interpreter endpoint
    pub interpreter_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Optional Referer header
    pub referer: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Server-side query timeout in seconds
    pub query_timeout_secs: u32,
}

impl OverpassConfig {
    /// Create a config pointing at the main public Overpass instance.
    pub fn new() -> Self {
        Self {
            interpreter_url: DEFAULT_INTERPRETER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            timeout_secs: 30,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    /// Set a custom interpreter URL (for testing or a mirror).
    pub fn with_interpreter_url(mut self, url: impl Into<String>) -> Self {
        self.interpreter_url = url.into();
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

    /// Set HTTP request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the server-side query timeout.
    pub fn with_query_timeout(mut self, secs: u32) -> Self {
        self.query_timeout_secs = secs;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Overpass API client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    interpreter_url: String,
    query_timeout_secs: u32,
}

impl OverpassClient {
    /// Create a new Overpass client with the given configuration.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let mut headers = HeaderMap::new();

        if let Some(referer) = &config.referer {
            let value = HeaderValue::from_str(referer).map_err(|_| {
                OverpassError::NotConfigured(format!("invalid Referer: {referer:?}"))
            })?;
            headers.insert(REFERER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            interpreter_url: config.interpreter_url,
            query_timeout_secs: config.query_timeout_secs,
        })
    }

    /// Run a raw Overpass QL query.
    pub async fn run_query(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        let response = self
            .http
            .post(&self.interpreter_url)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if status == reqwest::StatusCode::GATEWAY_TIMEOUT {
            return Err(OverpassError::Overloaded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        if let Some(remark) = &parsed.remark {
            warn!(remark = %remark, "Overpass returned a remark; result may be truncated");
        }

        Ok(parsed)
    }
}

impl RailNetworkProvider for OverpassClient {
    async fn fetch_rail_network(
        &self,
        bbox: &BoundingBox,
    ) -> Result<OverpassResponse, OverpassError> {
        let query = rail_ways_query(bbox, self.query_timeout_secs);
        let response = self.run_query(&query).await?;

        debug!(
            nodes = response.node_count(),
            ways = response.way_count(),
            "fetched rail network"
        );

        Ok(response)
    }
}
