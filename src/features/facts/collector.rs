use crate::features::facts::models::SynchronousFacts;
use crate::features::snapshot::gigabytes;
use chrono::Utc;
use sysinfo::System;

pub struct FactsCollector {
    sys: System,
}

impl FactsCollector {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }

    pub fn collect(&mut self) -> SynchronousFacts {
        self.sys.refresh_all();
        let load = System::load_average();

        SynchronousFacts {
            cpu: self
                .sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| String::from("unknown")),
            cores: self.sys.cpus().len(),
            cpu_load: [load.one, load.five, load.fifteen],
            ram: gigabytes(self.sys.total_memory()),
            free_ram: gigabytes(self.sys.free_memory()),
            os: os_descriptor(),
            uptime: System::uptime(),
            runtime_version: runtime_version(),
            username: whoami::username(),
            collected_at: Utc::now().to_rfc3339(),
        }
    }
}

impl Default for FactsCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn os_descriptor() -> String {
    let name = System::name().unwrap_or_else(|| String::from("unknown"));
    let release = System::os_version().unwrap_or_else(|| String::from("unknown"));
    format!("{} {} ({})", name, release, std::env::consts::ARCH)
}

fn runtime_version() -> String {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_complete_local_facts() {
        let mut collector = FactsCollector::new();
        let facts = collector.collect();

        assert!(facts.cores >= 1);
        assert!(!facts.cpu.is_empty());
        assert!(facts.ram.ends_with(" Go"));
        assert!(facts.free_ram.ends_with(" Go"));
        assert!(!facts.os.is_empty());
        assert!(!facts.username.is_empty());
        assert!(facts.runtime_version.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn timestamp_is_iso_8601() {
        let mut collector = FactsCollector::new();
        let facts = collector.collect();
        chrono::DateTime::parse_from_rfc3339(&facts.collected_at)
            .expect("collected_at must be a valid RFC 3339 timestamp");
    }
}
