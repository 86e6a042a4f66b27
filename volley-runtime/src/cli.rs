use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;
use volley_core::{
    positive, ClientConfig, ConfigError, RunConfig, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_TOTAL_REQUESTS,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Issue GET requests against a URL with bounded concurrency and report latency statistics.
#[derive(Parser, Debug)]
#[command(name = "volley", version, about, long_about = None)]
pub struct VolleyCli {
    /// Target URL
    pub url: String,

    /// Total number of requests
    #[arg(
        short = 'n',
        value_name = "N",
        default_value_t = DEFAULT_TOTAL_REQUESTS as i64,
        allow_negative_numbers = true
    )]
    pub requests: i64,

    /// Maximum number of concurrent requests
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_CONCURRENCY as i64,
        allow_negative_numbers = true,
        env = "VOLLEY_CONCURRENCY"
    )]
    pub concurrency: i64,

    /// Per-request timeout (e.g. `5s`, `750ms`)
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration, env = "VOLLEY_TIMEOUT")]
    pub timeout: Duration,

    /// Client-wide timeout
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration, env = "VOLLEY_TOTAL_TIMEOUT")]
    pub total_timeout: Duration,

    /// Upper bound on open connections [default: 2 x concurrency]
    #[arg(long, allow_negative_numbers = true)]
    pub max_connections: Option<i64>,

    /// Idle keep-alive connections kept per host [default: concurrency]
    #[arg(long)]
    pub max_idle_connections: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Serve Prometheus metrics on this address while the run is in progress
    #[arg(long, env = "VOLLEY_METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,
}

impl VolleyCli {
    /// Validate the arguments into a [`RunConfig`].
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let requests = positive("total requests", self.requests)?;
        let concurrency = positive("max concurrency", self.concurrency)?;
        let config = RunConfig::new(&self.url, requests.get(), concurrency.get())?;

        let defaults = ClientConfig::for_concurrency(concurrency);
        let max_connections = match self.max_connections {
            Some(max_connections) => positive("max connections", max_connections)?,
            None => defaults.max_connections,
        };

        config.with_client(ClientConfig {
            max_connections,
            max_idle_connections: self
                .max_idle_connections
                .unwrap_or(defaults.max_idle_connections),
            per_request_timeout: self.timeout,
            total_timeout: self.total_timeout,
        })
    }
}
