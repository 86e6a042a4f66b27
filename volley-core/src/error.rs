use crate::stats::AggregatedResults;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("Invalid target URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported URL scheme {0:?}; only http and https targets are supported")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Every dispatched request failed, so there is nothing to compute statistics over.
///
/// Carries the aggregated failure data so callers can still report counts and timings.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("All {} requests failed", .0.failure_count)]
pub struct AllFailed(pub AggregatedResults);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("No successful requests to compute statistics over")]
    NoData,

    #[error("Run completed in zero wall-clock time; throughput is undefined")]
    ZeroWallClock,
}
