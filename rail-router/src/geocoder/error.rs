//! Geocoder error types.

use super::convert::ConversionError;

/// Errors that can occur when resolving a single stop name.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service refused the request (usage policy or missing User-Agent)
    #[error("forbidden: the place-search service rejected our User-Agent")]
    Forbidden,

    /// Rate limited by the service
    #[error("rate limited by place-search service")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The service returned no results
    #[error("no match for {query:?}")]
    NoMatch { query: String },

    /// The top result could not be turned into a stop
    #[error("unusable place: {0}")]
    Unusable(#[from] ConversionError),

    /// Client-side configuration problem
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NoMatch {
            query: "Atlantis railway station".into(),
        };
        assert_eq!(err.to_string(), "no match for \"Atlantis railway station\"");

        let err = GeocodeError::Api {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(err.to_string(), "API error 503: busy");

        let err = GeocodeError::Unusable(ConversionError::UnparsableNumber {
            field: "lat",
            value: "x".into(),
        });
        assert_eq!(err.to_string(), "unusable place: unparsable lat: \"x\"");
    }
}
