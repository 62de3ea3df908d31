use crate::api::normalize::assemble;
use crate::api::request::{build_url, coordinate_query, redact_token};
use crate::api::response::classify;
use crate::api::transport::{HttpTransport, ReqwestTransport};
use crate::config::MapboxConfig;
use crate::domain::AddressRecord;
use crate::error::GeocodeError;

pub const PROVIDER_NAME: &str = "mapbox";

/// A geocoding backend selectable by name.
pub trait GeocodingProvider {
    fn name(&self) -> &'static str;

    /// Resolve a free-form address to candidate records.
    ///
    /// # Arguments
    /// * `address` - Free-form address (e.g., "10 Downing Street, London")
    ///
    /// # Returns
    /// * `Ok(records)` - One record per provider result, in provider order
    /// * `Err` - `UnsupportedInput` for IP literals, `InvalidCredentials`,
    ///   `QuotaExceeded`, `NoResult`, or `Transport` if no response arrived
    fn geocode(&self, address: &str) -> Result<Vec<AddressRecord>, GeocodeError>;

    /// Resolve a coordinate pair to candidate records.
    ///
    /// The pair is formatted as `"{lat},{lon}"` with six decimals and sent
    /// through the same path as [`GeocodingProvider::geocode`].
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees
    /// * `longitude` - Longitude in degrees
    ///
    /// # Returns
    /// * Same as `geocode` for the formatted query
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<AddressRecord>, GeocodeError>;
}

/// Mapbox Geocoding API v5 provider.
///
/// Holds no mutable state; each call performs exactly one GET.
#[derive(Debug, Clone)]
pub struct Mapbox<T = ReqwestTransport> {
    transport: T,
    config: MapboxConfig,
}

impl Mapbox<ReqwestTransport> {
    /// Provider backed by a blocking reqwest client using `config.timeout_secs`.
    pub fn with_reqwest(config: MapboxConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HttpTransport> Mapbox<T> {
    /// Create a provider on top of any transport.
    ///
    /// # Arguments
    /// * `transport` - Performs the GET requests (see [`ReqwestTransport`])
    /// * `config` - Read-only for the provider's lifetime
    pub fn new(transport: T, config: MapboxConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &MapboxConfig {
        &self.config
    }

    fn execute(&self, url: &str) -> Result<Vec<AddressRecord>, GeocodeError> {
        log::debug!("Mapbox request: {}", redact_token(url));

        let response = self
            .transport
            .get(url)
            .map_err(|source| GeocodeError::Transport {
                url: url.to_string(),
                source,
            })?;

        log::debug!(
            "Mapbox response: HTTP {} ({} bytes)",
            response.status,
            response.body.len()
        );

        let features = classify(url, response)?;
        let records = assemble(url, &features)?;
        log::debug!("Normalized {} feature(s)", records.len());

        Ok(records)
    }
}

impl<T: HttpTransport> GeocodingProvider for Mapbox<T> {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn geocode(&self, address: &str) -> Result<Vec<AddressRecord>, GeocodeError> {
        let url = build_url(address, &self.config)?;
        self.execute(&url)
    }

    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<AddressRecord>, GeocodeError> {
        self.geocode(&coordinate_query(latitude, longitude))
    }
}
