use crate::features::snapshot::SystemSnapshot;
use crate::shared::config::AgentConfig;
use crate::shared::error::ReportError;
use crate::shared::traits::SnapshotSink;
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use url::Url;

/// POSTs finished snapshots to the stats-collection endpoint.
pub struct HttpReporter {
    client: Client,
    endpoint: Url,
}

impl HttpReporter {
    pub fn new(client: Client, config: &AgentConfig) -> Result<Self, ReportError> {
        let endpoint = Url::parse(&config.report_url)?;
        Ok(Self { client, endpoint })
    }

    async fn post_snapshot(&self, snapshot: &SystemSnapshot) -> Result<String, ReportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(snapshot)
            .send()
            .await?
            .error_for_status()?;

        // The collector's answer is logged, never validated.
        let body = response.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl SnapshotSink for HttpReporter {
    async fn send(&self, snapshot: &SystemSnapshot) {
        match self.post_snapshot(snapshot).await {
            Ok(body) => info!("Snapshot delivered, collector answered: {}", body.trim()),
            Err(e) => error!("Failed to deliver snapshot: {}", e),
        }
    }
}
