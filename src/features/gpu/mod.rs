pub mod collector;

pub use collector::GpuProbe;
