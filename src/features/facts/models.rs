use serde::{Deserialize, Serialize};

/// Local OS facts read synchronously at the start of every cycle. These have
/// no external dependency and are expected to always be available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynchronousFacts {
    pub cpu: String,
    pub cores: usize,
    pub cpu_load: [f64; 3],
    pub ram: String,
    pub free_ram: String,
    pub os: String,
    pub uptime: u64,
    pub runtime_version: String,
    pub username: String,
    pub collected_at: String,
}
