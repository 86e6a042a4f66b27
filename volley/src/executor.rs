//! Execution of a single request.
use crate::gate::{ConcurrencyGate, GateError};
use crate::timer::Stopwatch;
use humantime::format_duration;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};
use volley_core::Outcome;

pub(crate) const LATENCY_METRIC: &str = "volley_request_latency_seconds";
pub(crate) const SUCCESS_METRIC: &str = "volley_request_success_total";
pub(crate) const ERROR_METRIC: &str = "volley_request_error_total";

/// Every way a single request can fail. Never escapes [`RequestExecutor::execute`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request timed out after {}", format_duration(*.0))]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
}

/// Performs the outbound GET.
///
/// Implementations report client and server error statuses as [`RequestError::Status`]; any
/// `Ok` is counted as a success.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    async fn get(&self, url: &Url, timeout: Duration) -> Result<(), RequestError>;
}

/// Issues one request through the gate and classifies the result.
pub struct RequestExecutor<T> {
    transport: Arc<T>,
    gate: ConcurrencyGate,
    url: Url,
    timeout: Duration,
}

impl<T> RequestExecutor<T>
where
    T: Transport + Sync,
{
    pub fn new(transport: Arc<T>, gate: ConcurrencyGate, url: Url, timeout: Duration) -> Self {
        Self {
            transport,
            gate,
            url,
            timeout,
        }
    }

    /// Run exactly one attempt. The latency includes time spent waiting on the gate.
    pub async fn execute(&self) -> Outcome {
        let watch = Stopwatch::start();
        let res = self.attempt().await;
        let latency = watch.elapsed();

        let outcome = match res {
            Ok(()) => Outcome::success(latency),
            Err(error) => {
                warn!("Request to {} failed: {error}", self.url);
                Outcome::failure(latency)
            }
        };

        #[cfg(feature = "metrics")]
        record_metrics(&outcome);

        outcome
    }

    async fn attempt(&self) -> Result<(), RequestError> {
        let permit = self.gate.acquire().await?;

        let res = match tokio::time::timeout(self.timeout, self.transport.get(&self.url, self.timeout))
            .await
        {
            Ok(res) => res,
            Err(_elapsed) => Err(RequestError::Timeout(self.timeout)),
        };

        permit.release();
        res
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(outcome: &Outcome) {
    metrics::histogram!(LATENCY_METRIC).record(outcome.latency().as_secs_f64());
    if outcome.is_success() {
        metrics::counter!(SUCCESS_METRIC).increment(1);
    } else {
        metrics::counter!(ERROR_METRIC).increment(1);
    }
}
