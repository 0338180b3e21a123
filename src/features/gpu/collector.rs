use crate::shared::error::CollectionError;
use crate::shared::traits::AsyncProbe;
use encoding_rs::GBK;
use log::debug;
use regex::Regex;
use std::process::Command;
use which::which;

/// Resolves a single descriptor for the primary video controller, through
/// `wmic` on Windows and `lspci` everywhere else.
pub struct GpuProbe;

impl GpuProbe {
    pub fn new() -> Self {
        Self
    }

    fn query_video_controllers() -> Result<String, CollectionError> {
        let output = Command::new("wmic")
            .args(["path", "win32_videocontroller", "get", "name"])
            .output()?;
        if !output.status.success() {
            return Err(CollectionError::SystemApi(format!(
                "wmic exited with {}",
                output.status
            )));
        }

        let (cow, _encoding_used, _had_errors) = GBK.decode(&output.stdout);
        parse_wmic_video(&cow).ok_or_else(|| {
            CollectionError::Parse("no video controller in wmic output".to_string())
        })
    }

    fn query_pci_devices() -> Result<String, CollectionError> {
        let lspci = which("lspci")
            .map_err(|_| CollectionError::SystemApi("lspci command not found".to_string()))?;
        let output = Command::new(lspci).output()?;
        if !output.status.success() {
            return Err(CollectionError::SystemApi(format!(
                "lspci exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        parse_lspci_vga(&text)
            .ok_or_else(|| CollectionError::Parse("no VGA controller in lspci output".to_string()))
    }
}

/// First listed controller name, skipping the `Name` column header.
fn parse_wmic_video(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.eq_ignore_ascii_case("Name"))
        .map(str::to_string)
}

/// Descriptor after the second colon of the VGA controller line, e.g.
/// `00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620`.
fn parse_lspci_vga(output: &str) -> Option<String> {
    let vga = Regex::new(r"(?i)vga").unwrap();
    output
        .lines()
        .find(|line| vga.is_match(line))
        .and_then(|line| line.splitn(3, ':').nth(2))
        .map(|descriptor| descriptor.trim().to_string())
        .filter(|descriptor| !descriptor.is_empty())
}

#[async_trait::async_trait]
impl AsyncProbe<String> for GpuProbe {
    async fn collect(&self) -> Result<String, CollectionError> {
        // The command runs on the blocking pool so the probe future stays
        // cancellable at its deadline even if the command hangs.
        let descriptor = tokio::task::spawn_blocking(|| {
            if cfg!(target_os = "windows") {
                Self::query_video_controllers()
            } else {
                Self::query_pci_devices()
            }
        })
        .await
        .map_err(|e| CollectionError::SystemApi(format!("probe task failed: {}", e)))??;

        debug!("Detected video controller: {}", descriptor);
        Ok(descriptor)
    }

    fn name(&self) -> &'static str {
        "gpu"
    }
}

impl Default for GpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmic_parser_returns_first_controller() {
        let output = "Name\r\nIntel(R) UHD Graphics 620\r\nNVIDIA GeForce MX150\r\n\r\n";
        assert_eq!(
            parse_wmic_video(output).as_deref(),
            Some("Intel(R) UHD Graphics 620")
        );
    }

    #[test]
    fn wmic_parser_rejects_header_only_output() {
        assert_eq!(parse_wmic_video("Name\r\n\r\n"), None);
        assert_eq!(parse_wmic_video(""), None);
    }

    #[test]
    fn lspci_parser_extracts_descriptor_after_second_colon() {
        let output = "\
00:00.0 Host bridge: Intel Corporation Xeon E3-1200 v6/7th Gen Core Processor Host Bridge/DRAM Registers (rev 02)
00:02.0 VGA compatible controller: Intel Corporation UHD Graphics 620 (rev 07)
00:14.0 USB controller: Intel Corporation Sunrise Point-LP USB 3.0 xHCI Controller (rev 21)
";
        assert_eq!(
            parse_lspci_vga(output).as_deref(),
            Some("Intel Corporation UHD Graphics 620 (rev 07)")
        );
    }

    #[test]
    fn lspci_parser_fails_without_vga_line() {
        let output = "00:14.0 USB controller: Intel Corporation Sunrise Point-LP\n";
        assert_eq!(parse_lspci_vga(output), None);
    }

    #[test]
    fn lspci_parser_fails_on_truncated_vga_line() {
        assert_eq!(parse_lspci_vga("VGA compatible controller\n"), None);
    }
}
