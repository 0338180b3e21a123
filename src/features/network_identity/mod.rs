pub mod collector;
pub mod models;

pub use collector::NetworkIdentityProbe;
pub use models::{GeoResponse, NetworkIdentity};
