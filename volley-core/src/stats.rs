#[cfg(feature = "serde")]
use serde::Serialize;
#[allow(unused_imports)]
#[cfg(feature = "serde")]
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::fmt;
use std::time::Duration;

/// Outcomes of a run, partitioned by status.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResults {
    pub success_latencies: Vec<Duration>,
    pub failure_latencies: Vec<Duration>,
    pub success_count: usize,
    pub failure_count: usize,
    pub total_wall_clock: Duration,
}

impl AggregatedResults {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn error_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.;
        }
        self.failure_count as f64 / self.total() as f64
    }

    /// Mean latency of the failed requests, if there were any.
    pub fn failure_mean(&self) -> Option<Duration> {
        if self.failure_latencies.is_empty() {
            return None;
        }
        let total: Duration = self.failure_latencies.iter().sum();
        Some(total / self.failure_latencies.len() as u32)
    }
}

/// Latency distribution of the successful requests of a run, plus throughput.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", cfg_eval::cfg_eval, serde_as)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Statistics {
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub mean: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub median: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub p90: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub p95: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub p99: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub min: Duration,
    #[cfg_attr(feature = "serde", serde_as(as = "DurationSecondsWithFrac<f64>"))]
    pub max: Duration,
    pub throughput_per_second: f64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RPS={:.2}, mean={:?}, p50={:?}, p90={:?}, p95={:?}, p99={:?}, min={:?}, max={:?}",
            self.throughput_per_second,
            self.mean,
            self.median,
            self.p90,
            self.p95,
            self.p99,
            self.min,
            self.max,
        )
    }
}
