//! Process configuration.

use std::net::SocketAddr;

use tracing::warn;

use crate::geocoder::NominatimConfig;
use crate::overpass::OverpassConfig;

/// User-Agent sent to the public OSM services unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("rail-router/", env!("CARGO_PKG_VERSION"));

/// Address the server binds to by default.
pub const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Top-level configuration for the server binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address
    pub addr: SocketAddr,
    /// Place-search client settings
    pub nominatim: NominatimConfig,
    /// Rail network client settings
    pub overpass: OverpassConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            nominatim: NominatimConfig::default(),
            overpass: OverpassConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables:
    /// - `RAIL_ROUTER_ADDR`: listen address, e.g. `0.0.0.0:8080`
    /// - `NOMINATIM_URL`: place-search base URL
    /// - `OVERPASS_URL`: Overpass interpreter URL
    /// - `RAIL_ROUTER_USER_AGENT`: User-Agent for both services
    /// - `RAIL_ROUTER_REFERER`: Referer for both services
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset or blank variables keep their defaults. An unparsable address
    /// is logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();

        if let Some(raw) = get("RAIL_ROUTER_ADDR") {
            match raw.parse::<SocketAddr>() {
                Ok(addr) => config.addr = addr,
                Err(e) => warn!(value = %raw, error = %e, "ignoring RAIL_ROUTER_ADDR"),
            }
        }

        if let Some(url) = get("NOMINATIM_URL") {
            config.nominatim = config.nominatim.with_base_url(url);
        }

        if let Some(url) = get("OVERPASS_URL") {
            config.overpass = config.overpass.with_interpreter_url(url);
        }

        if let Some(agent) = get("RAIL_ROUTER_USER_AGENT") {
            config.nominatim = config.nominatim.with_user_agent(agent.clone());
            config.overpass = config.overpass.with_user_agent(agent);
        }

        if let Some(referer) = get("RAIL_ROUTER_REFERER") {
            config.nominatim = config.nominatim.with_referer(referer.clone());
            config.overpass = config.overpass.with_referer(referer);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = from_pairs(&[]);

        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.nominatim.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.overpass.interpreter_url, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.nominatim.user_agent, DEFAULT_USER_AGENT);
        assert!(config.overpass.referer.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = from_pairs(&[
            ("RAIL_ROUTER_ADDR", "0.0.0.0:8080"),
            ("NOMINATIM_URL", "http://geo.local"),
            ("OVERPASS_URL", "http://overpass.local/api/interpreter"),
            ("RAIL_ROUTER_USER_AGENT", "my-app/2.0"),
            ("RAIL_ROUTER_REFERER", "https://my.app/"),
        ]);

        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.nominatim.base_url, "http://geo.local");
        assert_eq!(config.overpass.interpreter_url, "http://overpass.local/api/interpreter");
        assert_eq!(config.nominatim.user_agent, "my-app/2.0");
        assert_eq!(config.overpass.user_agent, "my-app/2.0");
        assert_eq!(config.nominatim.referer.as_deref(), Some("https://my.app/"));
        assert_eq!(config.overpass.referer.as_deref(), Some("https://my.app/"));
    }

    #[test]
    fn bad_address_keeps_default() {
        let config = from_pairs(&[("RAIL_ROUTER_ADDR", "not an address")]);
        assert_eq!(config.addr, SocketAddr::from(DEFAULT_ADDR));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = from_pairs(&[("NOMINATIM_URL", "   "), ("RAIL_ROUTER_REFERER", "")]);
        assert_eq!(config.nominatim.base_url, NominatimConfig::default().base_url);
        assert!(config.nominatim.referer.is_none());
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("rail-router/"));
    }
}
