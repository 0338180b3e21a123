use crate::features::disk::models::DiskUsage;
use crate::features::snapshot::gigabytes;
use crate::shared::error::CollectionError;
use crate::shared::traits::AsyncProbe;
use encoding_rs::GBK;
use log::debug;
use std::process::Command;

/// Reads disk capacity through `wmic logicaldisk` on Windows (every logical
/// disk) and `df` everywhere else (root filesystem only). Both paths are
/// normalized to an ordered sequence of `DiskUsage` records.
pub struct DiskProbe;

impl DiskProbe {
    pub fn new() -> Self {
        Self
    }

    fn query_logical_disks() -> Result<Vec<DiskUsage>, CollectionError> {
        let output = Command::new("wmic")
            .args(["logicaldisk", "get", "size,freespace,caption"])
            .output()?;
        if !output.status.success() {
            return Err(CollectionError::SystemApi(format!(
                "wmic exited with {}",
                output.status
            )));
        }

        let (cow, _encoding_used, _had_errors) = GBK.decode(&output.stdout);
        let disks = parse_wmic_logicaldisk(&cow);
        if disks.is_empty() {
            return Err(CollectionError::Parse(
                "no logical disks in wmic output".to_string(),
            ));
        }
        Ok(disks)
    }

    fn query_root_filesystem() -> Result<DiskUsage, CollectionError> {
        let output = Command::new("df")
            .args(["-BG", "--output=source,size,avail", "/"])
            .output()?;
        if !output.status.success() {
            return Err(CollectionError::SystemApi(format!(
                "df exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        parse_df_root(&text)
            .ok_or_else(|| CollectionError::Parse("unrecognized df output".to_string()))
    }
}

/// Parses `wmic logicaldisk get size,freespace,caption` output. Columns come
/// back in alphabetical order (caption, freespace, size) with sizes in bytes;
/// the header and drives without media fail the numeric parse and are skipped.
fn parse_wmic_logicaldisk(output: &str) -> Vec<DiskUsage> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return None;
            }
            let free = parts[1].parse::<u64>().ok()?;
            let size = parts[2].parse::<u64>().ok()?;
            Some(DiskUsage {
                disk: parts[0].to_string(),
                free: gigabytes(free),
                total: gigabytes(size),
            })
        })
        .collect()
}

/// Parses `df -BG --output=source,size,avail /` output. The first line whose
/// size and avail columns both carry the `G` unit is the root filesystem; the
/// header never matches.
fn parse_df_root(output: &str) -> Option<DiskUsage> {
    output.lines().find_map(|line| {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return None;
        }
        let total = parse_df_gigabytes(parts[1])?;
        let free = parse_df_gigabytes(parts[2])?;
        Some(DiskUsage {
            disk: parts[0].to_string(),
            free: format!("{:.2} Go", free),
            total: format!("{:.2} Go", total),
        })
    })
}

fn parse_df_gigabytes(field: &str) -> Option<f64> {
    field.strip_suffix('G')?.parse::<f64>().ok()
}

#[async_trait::async_trait]
impl AsyncProbe<Vec<DiskUsage>> for DiskProbe {
    async fn collect(&self) -> Result<Vec<DiskUsage>, CollectionError> {
        // The command runs on the blocking pool so the probe future stays
        // cancellable at its deadline even if the command hangs.
        let disks = tokio::task::spawn_blocking(|| {
            if cfg!(target_os = "windows") {
                Self::query_logical_disks()
            } else {
                Self::query_root_filesystem().map(|usage| vec![usage])
            }
        })
        .await
        .map_err(|e| CollectionError::SystemApi(format!("probe task failed: {}", e)))??;

        debug!("Collected usage for {} disk(s)", disks.len());
        Ok(disks)
    }

    fn name(&self) -> &'static str {
        "disk"
    }
}

impl Default for DiskProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmic_parser_converts_every_disk_to_gigabytes() {
        let output = "\
Caption  FreeSpace     Size\r
C:       128849018880  512110190592\r
D:       51539607552   256060514304\r
\r
";
        let disks = parse_wmic_logicaldisk(output);
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].disk, "C:");
        assert_eq!(disks[0].free, "120.00 Go");
        assert_eq!(disks[0].total, "476.94 Go");
        assert_eq!(disks[1].disk, "D:");
    }

    #[test]
    fn wmic_parser_skips_drives_without_media() {
        let output = "\
Caption  FreeSpace     Size\r
C:       128849018880  512110190592\r
E:\r
";
        let disks = parse_wmic_logicaldisk(output);
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].disk, "C:");
    }

    #[test]
    fn df_parser_reads_the_root_filesystem_line() {
        let output = "\
Filesystem     1G-blocks Avail
/dev/sda1           500G  120G
";
        let usage = parse_df_root(output).unwrap();
        assert_eq!(
            usage,
            DiskUsage {
                disk: "/dev/sda1".to_string(),
                free: "120.00 Go".to_string(),
                total: "500.00 Go".to_string(),
            }
        );
    }

    #[test]
    fn df_parser_fails_on_garbage() {
        assert_eq!(parse_df_root(""), None);
        assert_eq!(parse_df_root("Filesystem 1G-blocks Avail\n"), None);
        assert_eq!(parse_df_root("df: /: No such file or directory\n"), None);
    }
}
