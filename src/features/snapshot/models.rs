use crate::features::disk::DiskUsage;
use serde::{Deserialize, Serialize};

/// Placeholder written into every field whose source probe failed.
pub const UNAVAILABLE: &str = "Non disponible";

pub fn gigabytes(bytes: u64) -> String {
    format!("{:.2} Go", bytes as f64 / 1_073_741_824.0)
}

/// Serializes as the per-disk record sequence when the probe succeeded and as
/// the sentinel string when it did not; the field itself is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiskUsageField {
    Disks(Vec<DiskUsage>),
    Unavailable(String),
}

impl DiskUsageField {
    pub fn unavailable() -> Self {
        Self::Unavailable(UNAVAILABLE.to_string())
    }
}

/// One complete collection cycle's worth of host facts, flattened for the
/// collector endpoint. Built once per cycle, shipped, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
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
    pub gpu: String,
    pub disk_usage: DiskUsageField,
    pub ipv4: String,
    pub ipv6: String,
    pub location: String,
    pub isp: String,
    pub timezone: String,
    pub email: String,
}
