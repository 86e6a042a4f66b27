//! Latency distribution and throughput of a completed run.
//!
//! Quantiles use linear interpolation between closest ranks: for `k` sorted samples the value at
//! quantile `q` sits at rank `q * (k - 1)`. The median is the 0.5 quantile.
use std::time::Duration;
use volley_core::{AggregatedResults, Statistics, StatisticsError};

pub const MEDIAN: f64 = 0.50;
pub const P90: f64 = 0.90;
pub const P95: f64 = 0.95;
pub const P99: f64 = 0.99;

/// Compute [`Statistics`] over the successful latencies of `results`.
pub fn compute(results: &AggregatedResults) -> Result<Statistics, StatisticsError> {
    if results.success_latencies.is_empty() {
        return Err(StatisticsError::NoData);
    }

    let wall_clock = results.total_wall_clock.as_secs_f64();
    if wall_clock <= 0. {
        return Err(StatisticsError::ZeroWallClock);
    }

    let mut secs: Vec<f64> = results
        .success_latencies
        .iter()
        .map(Duration::as_secs_f64)
        .collect();
    secs.sort_by(f64::total_cmp);

    let quantile = |q| quantile_sorted(&secs, q).ok_or(StatisticsError::NoData);

    Ok(Statistics {
        mean: Duration::from_secs_f64(statistical::mean(&secs[..])),
        median: Duration::from_secs_f64(quantile(MEDIAN)?),
        p90: Duration::from_secs_f64(quantile(P90)?),
        p95: Duration::from_secs_f64(quantile(P95)?),
        p99: Duration::from_secs_f64(quantile(P99)?),
        min: Duration::from_secs_f64(secs[0]),
        max: Duration::from_secs_f64(secs[secs.len() - 1]),
        throughput_per_second: results.success_count as f64 / wall_clock,
    })
}

/// Linearly interpolated quantile of already sorted values. `None` when `sorted` is empty.
pub fn quantile_sorted(sorted: &[f64], quantile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = quantile.clamp(0., 1.) * last as f64;

    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}
