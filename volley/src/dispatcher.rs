//! Fan-out of a run's requests.
//!
//! Every request is spawned up front; pacing is left entirely to the [`ConcurrencyGate`].
use crate::executor::{RequestExecutor, Transport};
use crate::gate::ConcurrencyGate;
use crate::http::HttpTransport;
use crate::timer::Stopwatch;
use humantime::format_duration;
use std::sync::Arc;
use std::time::Duration;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn, Instrument};
use volley_core::{Outcome, RunConfig};

/// Raw output of a run, before aggregation.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub outcomes: Vec<Outcome>,
    /// From dispatch of the first request to completion of the last.
    pub wall_clock: Duration,
    /// Most requests that were ever admitted at the same time.
    pub high_water_mark: usize,
}

pub struct Dispatcher {
    config: RunConfig,
}

impl Dispatcher {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run against the configured URL over HTTP. The client lives for this call only.
    pub async fn run(&self) -> Result<Dispatch, reqwest::Error> {
        let transport = Arc::new(HttpTransport::new(self.config.client())?);
        Ok(self.run_with(transport).await)
    }

    #[instrument(name = "dispatch", skip_all, fields(url = %self.config.url()))]
    pub async fn run_with<T>(&self, transport: Arc<T>) -> Dispatch
    where
        T: Transport + Sync + 'static,
    {
        info!("Dispatching with config {}", self.config);
        #[cfg(feature = "metrics")]
        describe_metrics();

        let total = self.config.total_requests().get();
        let gate = ConcurrencyGate::new(self.config.max_concurrency());
        let executor = Arc::new(RequestExecutor::new(
            transport,
            gate.clone(),
            self.config.url().clone(),
            self.config.per_request_timeout(),
        ));

        let watch = Stopwatch::start();
        let tasks: Vec<_> = (0..total)
            .map(|id| {
                let executor = executor.clone();
                trace!("Spawning request task {id}.");
                let spawned = Stopwatch::start();
                let handle =
                    tokio::spawn(async move { executor.execute().await }.in_current_span());
                (spawned, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(total);
        for (spawned, handle) in tasks {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!("Request task did not complete: {err}");
                    outcomes.push(Outcome::failure(spawned.elapsed()));
                }
            }
        }
        let wall_clock = watch.elapsed();
        let high_water_mark = gate.high_water_mark();

        #[cfg(feature = "metrics")]
        metrics::gauge!(HIGH_WATER_METRIC).set(high_water_mark as f64);

        info!(
            "Dispatch complete: {} requests in {}, peak concurrency {}/{}",
            outcomes.len(),
            format_duration(wall_clock),
            high_water_mark,
            self.config.max_concurrency(),
        );

        Dispatch {
            outcomes,
            wall_clock,
            high_water_mark,
        }
    }
}

#[cfg(feature = "metrics")]
const HIGH_WATER_METRIC: &str = "volley_gate_high_water";

#[cfg(feature = "metrics")]
fn describe_metrics() {
    use crate::executor::{ERROR_METRIC, LATENCY_METRIC, SUCCESS_METRIC};

    metrics::describe_histogram!(
        LATENCY_METRIC,
        metrics::Unit::Seconds,
        "End-to-end request latency, including time waiting for admission."
    );
    metrics::describe_counter!(SUCCESS_METRIC, "Requests answered with a 2xx or 3xx status.");
    metrics::describe_counter!(ERROR_METRIC, "Requests that failed for any reason.");
    metrics::describe_gauge!(
        HIGH_WATER_METRIC,
        "Most requests admitted at once during the last run."
    );
}
