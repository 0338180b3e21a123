use crate::features::disk::{DiskProbe, DiskUsage};
use crate::features::email::EmailProbe;
use crate::features::facts::{FactsCollector, SynchronousFacts};
use crate::features::gpu::GpuProbe;
use crate::features::network_identity::{NetworkIdentity, NetworkIdentityProbe};
use crate::features::snapshot::models::{DiskUsageField, SystemSnapshot, UNAVAILABLE};
use crate::shared::config::AgentConfig;
use crate::shared::traits::{AsyncProbe, SnapshotSink};
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;

/// Gathers the synchronous local facts, runs the four probes concurrently and
/// merges everything into one complete snapshot per cycle.
pub struct StatsAggregator {
    facts: FactsCollector,
    gpu: GpuProbe,
    disk: DiskProbe,
    network: NetworkIdentityProbe,
    email: EmailProbe,
    probe_deadline: Duration,
}

impl StatsAggregator {
    pub fn new(client: Client, config: &AgentConfig) -> Self {
        Self {
            facts: FactsCollector::new(),
            gpu: GpuProbe::new(),
            disk: DiskProbe::new(),
            network: NetworkIdentityProbe::new(client.clone(), config),
            email: EmailProbe::new(client, config),
            probe_deadline: Duration::from_secs(config.probe_timeout_secs),
        }
    }

    /// Never fails: a failed or timed-out probe degrades to the sentinel for
    /// the fields it owns, and the synchronous facts carry the rest.
    pub async fn aggregate(&mut self) -> SystemSnapshot {
        let facts = self.facts.collect();

        let deadline = self.probe_deadline;
        let (gpu, disks, network, email) = futures::join!(
            Self::settle(&self.gpu, deadline),
            Self::settle(&self.disk, deadline),
            Self::settle(&self.network, deadline),
            Self::settle(&self.email, deadline),
        );

        merge(facts, gpu, disks, network, email)
    }

    /// Collects one snapshot and hands it to the sink exactly once. Delivery
    /// outcome stays with the sink.
    pub async fn run_cycle(&mut self, sink: &dyn SnapshotSink) {
        let snapshot = self.aggregate().await;
        info!(
            "Collected snapshot for user '{}' at {}",
            snapshot.username, snapshot.collected_at
        );
        sink.send(&snapshot).await;
    }

    /// Runs one probe under the per-probe deadline. Failures and timeouts are
    /// logged here and surface as `None` for the merge step to sentinel.
    async fn settle<T, P>(probe: &P, deadline: Duration) -> Option<T>
    where
        T: Send,
        P: AsyncProbe<T> + Sync,
    {
        match timeout(deadline, probe.collect()).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!("Probe '{}' failed: {}", probe.name(), e);
                None
            }
            Err(_) => {
                warn!(
                    "Probe '{}' did not finish within {}s",
                    probe.name(),
                    deadline.as_secs()
                );
                None
            }
        }
    }
}

/// Each probe owns its own fields: the network identity degrades as a group
/// of five, the others as a single field each, independently.
fn merge(
    facts: SynchronousFacts,
    gpu: Option<String>,
    disks: Option<Vec<DiskUsage>>,
    network: Option<NetworkIdentity>,
    email: Option<String>,
) -> SystemSnapshot {
    let sentinel = || UNAVAILABLE.to_string();
    let network = network.unwrap_or_else(|| NetworkIdentity {
        ipv4: sentinel(),
        ipv6: sentinel(),
        location: sentinel(),
        isp: sentinel(),
        timezone: sentinel(),
    });

    SystemSnapshot {
        cpu: facts.cpu,
        cores: facts.cores,
        cpu_load: facts.cpu_load,
        ram: facts.ram,
        free_ram: facts.free_ram,
        os: facts.os,
        uptime: facts.uptime,
        runtime_version: facts.runtime_version,
        username: facts.username,
        collected_at: facts.collected_at,
        gpu: gpu.unwrap_or_else(sentinel),
        disk_usage: disks
            .map(DiskUsageField::Disks)
            .unwrap_or_else(DiskUsageField::unavailable),
        ipv4: network.ipv4,
        ipv6: network.ipv6,
        location: network.location,
        isp: network.isp,
        timezone: network.timezone,
        email: email.unwrap_or_else(sentinel),
    }
}
