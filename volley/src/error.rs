use thiserror::Error;
use volley_core::{ConfigError, StatisticsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Statistics unavailable: {0}")]
    Statistics(#[from] StatisticsError),
}
