pub mod address;
pub mod context;

pub use address::{AddressRecord, AdminLevel, Bounds};
pub use context::{ContextEntry, PlaceType};
