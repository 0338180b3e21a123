use hoststats::{
    AgentConfig, AgentError, ConfigError, HttpReporter, ReportError, StatsAggregator,
};
use log::{error, info};
use std::path::Path;
use std::time::Duration;
use tokio::time;

const DEFAULT_CONFIG_PATH: &str = "hoststats.yaml";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AgentError> {
    let config = load_config()?;

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(ReportError::Request)?;

    let reporter = HttpReporter::new(client.clone(), &config)?;
    let mut aggregator = StatsAggregator::new(client, &config);

    info!("Starting host stats collection...");

    if config.interval_secs == 0 {
        aggregator.run_cycle(&reporter).await;
        return Ok(());
    }

    info!("Reporting every {} seconds", config.interval_secs);
    let mut interval = time::interval(Duration::from_secs(config.interval_secs));
    loop {
        interval.tick().await;
        aggregator.run_cycle(&reporter).await;
    }
}

fn load_config() -> Result<AgentConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            AgentConfig::load_from_file(path)
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            AgentConfig::load_from_file(DEFAULT_CONFIG_PATH)
        }
        None => {
            let config = AgentConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}
