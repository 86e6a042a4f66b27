//! Stub HTTP target for exercising volley end to end.
use anyhow::Result;
use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lazy_static::lazy_static;
use metrics::counter;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::{
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub fn router() -> Router {
    Router::new()
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/jitter/ms/:mean_ms/:std_dev_ms", get(jitter))
        .route("/status/:code", get(status))
        .route(
            "/max/:max_tps/delay/ms/:delay_ms/scenario/:scenario_name",
            get(max),
        )
        .layer(TraceLayer::new_for_http())
}

/// Serve on `addr` until the process exits.
pub async fn run(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Mock service listening on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Serve on an ephemeral local port in the background and return the bound address.
pub async fn spawn() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router()).await {
            tracing::error!("Mock service stopped: {err}");
        }
    });
    Ok(addr)
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) {
    record_hit();
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

/// Normally distributed delay, clamped at zero.
#[debug_handler]
pub async fn jitter(Path((mean_ms, std_dev_ms)): Path<(f64, f64)>) -> Result<(), StatusCode> {
    record_hit();
    let normal = Normal::new(mean_ms, std_dev_ms).map_err(|_| StatusCode::BAD_REQUEST)?;
    let delay_ms = normal.sample(&mut rand::thread_rng()).max(0.);
    tokio::time::sleep(Duration::from_secs_f64(delay_ms / 1_000.)).await;
    Ok(())
}

#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    record_hit();
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

lazy_static! {
    static ref MAX_MAP: Arc<RwLock<HashMap<String, Arc<DefaultDirectRateLimiter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

/// Answers 500 once `scenario_name` exceeds `max_tps`.
#[debug_handler]
pub async fn max(
    Path((max_tps, delay_ms, scenario_name)): Path<(u32, u64, String)>,
) -> Result<(), StatusCode> {
    record_hit();
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    let tps = NonZeroU32::new(max_tps).ok_or(StatusCode::BAD_REQUEST)?;
    let existing = MAX_MAP
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&scenario_name)
        .cloned();
    let limiter = match existing {
        Some(limiter) => limiter,
        None => {
            debug!("New rate limited scenario {scenario_name} at {tps} TPS");
            MAX_MAP
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(scenario_name)
                .or_insert_with(|| Arc::new(rate_limiter(tps)))
                .clone()
        }
    };

    limiter
        .check()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn rate_limiter(tps: NonZeroU32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(tps))
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

fn record_hit() {
    counter!("mock_service_requests_total").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
}

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let transactions = TPS_MEASURE.swap(0, Ordering::Relaxed);
        if transactions > 0 {
            info!("{transactions} TPS");
        }
    }
}
