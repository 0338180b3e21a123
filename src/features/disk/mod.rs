pub mod collector;
pub mod models;

pub use collector::DiskProbe;
pub use models::DiskUsage;
