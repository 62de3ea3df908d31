use thiserror::Error;

use crate::api::request::redact_token;

/// Errors returned by a geocoding call.
///
/// Every variant carries the input or URL that was attempted. None of them are
/// retried; a call either yields all records or exactly one of these.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The input was an IP literal, which the geocoding API cannot resolve
    #[error("unsupported input {input:?}: IP addresses cannot be geocoded")]
    UnsupportedInput { input: String },

    /// HTTP 401 from the service
    #[error("invalid access token for {}", redact_token(.url))]
    InvalidCredentials { url: String },

    /// HTTP 429 from the service
    #[error("quota exceeded for {}", redact_token(.url))]
    QuotaExceeded { url: String },

    /// Empty or unparsable body, no features, or any other non-200 status
    #[error("no result for {} ({reason})", redact_token(.url))]
    NoResult { url: String, reason: String },

    /// The transport failed before a response was received
    #[error("transport failure for {}", redact_token(.url))]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

impl GeocodeError {
    pub(crate) fn no_result(url: &str, reason: impl Into<String>) -> Self {
        Self::NoResult {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// The URL (or raw input, for `UnsupportedInput`) the failing call attempted.
    pub fn query(&self) -> &str {
        match self {
            Self::UnsupportedInput { input } => input,
            Self::InvalidCredentials { url }
            | Self::QuotaExceeded { url }
            | Self::NoResult { url, .. }
            | Self::Transport { url, .. } => url,
        }
    }
}
