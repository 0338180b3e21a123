use crate::features::network_identity::models::{GeoResponse, NetworkIdentity};
use crate::shared::config::AgentConfig;
use crate::shared::error::{CollectionError, NetworkProbeError};
use crate::shared::traits::AsyncProbe;
use log::debug;
use reqwest::Client;

/// Looks up the host's public IPv4, public IPv6 and geolocation/ISP record.
/// Unlike the other probes this one is all-or-nothing: a failure of any of
/// the three lookups fails the probe, and the aggregation step blanks every
/// network field as a group.
pub struct NetworkIdentityProbe {
    client: Client,
    ipv4_url: String,
    ipv6_url: String,
    geo_url: String,
}

impl NetworkIdentityProbe {
    pub fn new(client: Client, config: &AgentConfig) -> Self {
        Self {
            client,
            ipv4_url: config.ipv4_url.clone(),
            ipv6_url: config.ipv6_url.clone(),
            geo_url: config.geo_url.clone(),
        }
    }

    async fn fetch_address(&self, url: &str) -> Result<String, NetworkProbeError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let address = body.trim().to_string();
        if address.is_empty() {
            return Err(NetworkProbeError::MalformedBody(format!(
                "empty body from {}",
                url
            )));
        }
        Ok(address)
    }

    async fn fetch_geolocation(&self) -> Result<GeoResponse, NetworkProbeError> {
        let geo = self
            .client
            .get(&self.geo_url)
            .send()
            .await?
            .error_for_status()?
            .json::<GeoResponse>()
            .await?;
        Ok(geo)
    }
}

#[async_trait::async_trait]
impl AsyncProbe<NetworkIdentity> for NetworkIdentityProbe {
    async fn collect(&self) -> Result<NetworkIdentity, CollectionError> {
        // The three lookups are deliberately sequential, not raced.
        let ipv4 = self.fetch_address(&self.ipv4_url).await?;
        let ipv6 = self.fetch_address(&self.ipv6_url).await?;
        let geo = self.fetch_geolocation().await?;

        debug!("Resolved public identity for {}", ipv4);
        Ok(NetworkIdentity {
            ipv4,
            ipv6,
            location: geo.location(),
            isp: geo.org,
            timezone: geo.timezone,
        })
    }

    fn name(&self) -> &'static str {
        "network_identity"
    }
}
