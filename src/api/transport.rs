use anyhow::{Context, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("mapbox-geocoder/", env!("CARGO_PKG_VERSION"));

/// Status code and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a GET and hands back whatever the server answered.
///
/// Non-2xx statuses are not errors here; `Err` means no response was received.
pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<RawResponse> {
        (**self).get(url)
    }
}

/// Blocking reqwest transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Failed to send request to Mapbox API")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .context("Failed to read Mapbox response body")?;

        Ok(RawResponse { status, body })
    }
}
