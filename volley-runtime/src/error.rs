use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use volley_core::ConfigError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid arguments: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] volley::Error),

    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to install Prometheus exporter: {0}")]
    Metrics(#[from] BuildError),
}
