mod utils;
#[allow(unused)]
use utils::*;

use std::time::Duration;
use volley::prelude::*;
use volley::run;

fn measured(report: RunReport) -> (AggregatedResults, Statistics) {
    match report.summary {
        Summary::Measured {
            results,
            statistics,
        } => (results, statistics),
        Summary::AllFailed(err) => panic!("expected successes: {err}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ntest::timeout(20_000)]
async fn fixed_delay_throughput() {
    let addr = mock_service().await;

    let config = RunConfig::new(&url(addr, "/delay/ms/50"), 40, 10).unwrap();
    let report = run(config).await.unwrap();
    assert!(report.high_water_mark <= 10);

    let (results, statistics) = measured(report);
    assert_eq!(results.success_count, 40);
    assert_eq!(results.failure_count, 0);

    // Four waves of ten 50ms requests.
    assert!(results.total_wall_clock >= Duration::from_millis(200));
    assert!(statistics.min >= Duration::from_millis(50));

    let expected = results.success_count as f64 / results.total_wall_clock.as_secs_f64();
    assert!((statistics.throughput_per_second - expected).abs() < 1e-6);
    // Upper bound is C / delay.
    assert!(statistics.throughput_per_second <= 200.);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ntest::timeout(20_000)]
async fn error_status_counts_as_failure() {
    let addr = mock_service().await;

    for code in ["/status/500", "/status/404"] {
        let config = RunConfig::new(&url(addr, code), 20, 5).unwrap();
        let report = run(config).await.unwrap();

        let Summary::AllFailed(AllFailed(results)) = report.summary else {
            panic!("expected every request to {code} to fail");
        };
        assert_eq!(results.failure_count, 20);
        assert_eq!(results.success_count, 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ntest::timeout(20_000)]
async fn redirect_status_counts_as_success() {
    let addr = mock_service().await;

    let config = RunConfig::new(&url(addr, "/status/304"), 5, 5).unwrap();
    let (results, _) = measured(run(config).await.unwrap());
    assert_eq!(results.success_count, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ntest::timeout(20_000)]
async fn rate_limited_target_mixes_outcomes() {
    let addr = mock_service().await;

    // Burst of five, then 500s.
    let config = RunConfig::new(&url(addr, "/max/5/delay/ms/0/scenario/mixed"), 30, 30).unwrap();
    let (results, statistics) = measured(run(config).await.unwrap());

    assert_eq!(results.total(), 30);
    assert!(results.success_count >= 1);
    assert!(results.failure_count >= 1);
    assert_eq!(results.failure_latencies.len(), results.failure_count);
    assert!(statistics.min <= statistics.max);
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn unreachable_target_all_failed() {
    init();

    let config = RunConfig::new("http://127.0.0.1:1/", 8, 4).unwrap();
    let report = run(config).await.unwrap();

    let Summary::AllFailed(AllFailed(results)) = report.summary else {
        panic!("expected connection failures");
    };
    assert_eq!(results.failure_count, 8);
    assert!(results.failure_mean().is_some());
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn request_timeout_counts_as_failure() {
    let addr = mock_service().await;

    let report = LoadTest::new(&url(addr, "/delay/ms/2000"))
        .requests(4)
        .concurrency(4)
        .timeout(Duration::from_millis(100))
        .await
        .unwrap();

    let Summary::AllFailed(AllFailed(results)) = report.summary else {
        panic!("expected every request to time out");
    };
    assert_eq!(results.failure_count, 4);
    for latency in results.failure_latencies {
        assert!(latency >= Duration::from_millis(100));
        assert!(latency < Duration::from_millis(2000));
    }
}

#[tokio::test]
#[ntest::timeout(20_000)]
async fn single_request() {
    let addr = mock_service().await;

    let report = LoadTest::new(&url(addr, "/delay/ms/1"))
        .requests(1)
        .concurrency(1)
        .await
        .unwrap();
    assert_eq!(report.high_water_mark, 1);

    let (results, statistics) = measured(report);
    assert_eq!(results.success_count, 1);
    assert_eq!(statistics.min, statistics.max);
    assert_eq!(statistics.median, statistics.p99);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ntest::timeout(30_000)]
async fn jittered_target_respects_concurrency() {
    let addr = mock_service().await;

    let config = RunConfig::new(&url(addr, "/jitter/ms/5/3"), 300, 16).unwrap();
    let report = run(config).await.unwrap();
    assert!(report.high_water_mark <= 16);

    let (results, statistics) = measured(report);
    assert_eq!(results.total(), 300);
    assert!(statistics.min <= statistics.median);
    assert!(statistics.median <= statistics.p90);
    assert!(statistics.p90 <= statistics.p95);
    assert!(statistics.p95 <= statistics.p99);
    assert!(statistics.p99 <= statistics.max);
}

#[tokio::test]
async fn invalid_config_rejected() {
    assert!(matches!(
        RunConfig::new("http://127.0.0.1:1/", 0, 1),
        Err(volley_core::ConfigError::NonPositive { .. })
    ));

    let res = LoadTest::new("not a url").await;
    assert!(matches!(res, Err(volley::Error::Config(_))));
}
