use serde::{Deserialize, Serialize};

/// Free and total capacity of one disk, already formatted in gigabytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub disk: String,
    pub free: String,
    pub total: String,
}
