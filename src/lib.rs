//! mapbox-geocoder - Geocode addresses and coordinates through the Mapbox API
//! into provider-agnostic address records

pub mod api;
pub mod config;
pub mod domain;
pub mod error;

pub use api::{GeocodingProvider, HttpTransport, Mapbox, RawResponse, ReqwestTransport};
pub use config::{Dataset, MapboxConfig};
pub use domain::{AddressRecord, AdminLevel, Bounds};
pub use error::GeocodeError;
