pub mod collector;
pub mod models;

pub use collector::FactsCollector;
pub use models::SynchronousFacts;
