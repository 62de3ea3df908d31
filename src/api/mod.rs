pub mod mapbox;
pub mod normalize;
pub mod request;
pub mod response;
pub mod transport;

pub use mapbox::{GeocodingProvider, Mapbox, PROVIDER_NAME};
pub use request::{build_url, coordinate_query};
pub use response::{Feature, classify};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
