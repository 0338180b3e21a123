use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Reporting failed: {0}")]
    Report(#[from] ReportError),
}

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse data: {0}")]
    Parse(String),

    #[error("System API error: {0}")]
    SystemApi(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network identity probe failed: {0}")]
    NetworkProbe(#[from] NetworkProbeError),
}

#[derive(Error, Debug)]
pub enum NetworkProbeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Failed to deliver snapshot: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
