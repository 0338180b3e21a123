use crate::shared::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

/// Process-wide settings, loaded once at startup. Every endpoint defaults to
/// the production collector; a YAML file can override any subset of fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Stats-collection endpoint the finished snapshot is POSTed to.
    pub report_url: String,
    /// Registration endpoint resolving the installation's email address.
    pub email_url: String,
    /// Plain-text public IPv4 echo endpoint.
    pub ipv4_url: String,
    /// Plain-text public IPv6 echo endpoint.
    pub ipv6_url: String,
    /// Combined geolocation/ISP/timezone lookup endpoint.
    pub geo_url: String,
    /// Deadline applied to each probe individually.
    pub probe_timeout_secs: u64,
    /// Seconds between collection cycles. 0 means collect once and exit.
    pub interval_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            report_url: String::from("https://launcher.kginfoservs.com/index.php"),
            email_url: String::from("https://launcher.kginfoservs.com/get-email.php"),
            ipv4_url: String::from("https://ipv4.icanhazip.com"),
            ipv6_url: String::from("https://ipv6.icanhazip.com"),
            geo_url: String::from("https://ipapi.co/json/"),
            probe_timeout_secs: 10,
            interval_secs: 0,
        }
    }
}

impl AgentConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let config: AgentConfig =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path_display,
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoints = [
            ("report_url", &self.report_url),
            ("email_url", &self.email_url),
            ("ipv4_url", &self.ipv4_url),
            ("ipv6_url", &self.ipv6_url),
            ("geo_url", &self.geo_url),
        ];
        for (field, value) in endpoints {
            Url::parse(value).map_err(|e| {
                ConfigError::Validation(format!("{} is not a valid URL: {}", field, e))
            })?;
        }

        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "probe_timeout_secs must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AgentConfig::default();
        config.validate().expect("default configuration must validate");
        assert_eq!(config.interval_secs, 0);
        assert_eq!(config.probe_timeout_secs, 10);
    }

    #[test]
    fn partial_yaml_overrides_keep_remaining_defaults() {
        let yaml = "report_url: http://127.0.0.1:8080/ingest\ninterval_secs: 300\n";
        let config: AgentConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.report_url, "http://127.0.0.1:8080/ingest");
        assert_eq!(config.interval_secs, 300);
        assert_eq!(config.geo_url, AgentConfig::default().geo_url);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let mut config = AgentConfig::default();
        config.ipv4_url = String::from("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_zero_probe_timeout() {
        let mut config = AgentConfig::default();
        config.probe_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = AgentConfig::load_from_file("/nonexistent/hoststats.yaml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
