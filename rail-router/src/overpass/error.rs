//! Overpass client error types.

use std::fmt;

/// Errors from the Overpass HTTP client.
#[derive(Debug)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// The server gave up on the query (Overpass answers 504 when overloaded)
    Overloaded,

    /// Client-side configuration problem
    NotConfigured(String),
}

impl fmt::Display for OverpassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverpassError::Http(e) => write!(f, "HTTP error: {e}"),
            OverpassError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            OverpassError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            OverpassError::RateLimited => write!(f, "rate limited by Overpass API"),
            OverpassError::Overloaded => write!(f, "Overpass API overloaded (gateway timeout)"),
            OverpassError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for OverpassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverpassError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OverpassError {
    fn from(err: reqwest::Error) -> Self {
        OverpassError::Http(err)
    }
}
