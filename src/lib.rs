pub mod features;
pub mod shared;

// Re-export commonly used items from features
pub use features::disk::{DiskProbe, DiskUsage};
pub use features::email::EmailProbe;
pub use features::facts::{FactsCollector, SynchronousFacts};
pub use features::gpu::GpuProbe;
pub use features::network_identity::{NetworkIdentity, NetworkIdentityProbe};
pub use features::snapshot::{DiskUsageField, StatsAggregator, SystemSnapshot, UNAVAILABLE};

// Re-export shared functionality
pub use shared::config::AgentConfig;
pub use shared::error::{
    AgentError,
    CollectionError,
    ConfigError,
    NetworkProbeError,
    ReportError,
};
pub use shared::reporter::HttpReporter;
pub use shared::traits::{AsyncProbe, SnapshotSink};
