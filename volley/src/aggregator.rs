use std::time::Duration;
use volley_core::{AggregatedResults, AllFailed, Outcome};

/// Partition a run's outcomes by status.
///
/// Returns [`AllFailed`] instead of results when not a single request succeeded, since there is
/// no latency distribution to compute.
pub fn aggregate<I>(outcomes: I, total_wall_clock: Duration) -> Result<AggregatedResults, AllFailed>
where
    I: IntoIterator<Item = Outcome>,
{
    let mut success_latencies = vec![];
    let mut failure_latencies = vec![];

    for outcome in outcomes {
        match outcome {
            Outcome::Success { latency } => success_latencies.push(latency),
            Outcome::Failure { latency } => failure_latencies.push(latency),
        }
    }

    let results = AggregatedResults {
        success_count: success_latencies.len(),
        failure_count: failure_latencies.len(),
        success_latencies,
        failure_latencies,
        total_wall_clock,
    };

    if results.success_count == 0 {
        Err(AllFailed(results))
    } else {
        Ok(results)
    }
}
