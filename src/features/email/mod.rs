pub mod collector;

pub use collector::EmailProbe;
