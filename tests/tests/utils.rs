use std::net::SocketAddr;
use std::sync::OnceLock;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install logging once per test binary.
#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("volley=debug,mock_service=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Boot a mock service on the current runtime. Each `#[tokio::test]` owns its runtime, so every
/// test gets its own instance.
#[allow(unused)]
pub async fn mock_service() -> SocketAddr {
    init();
    mock_service::spawn().await.unwrap()
}

#[allow(unused)]
pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
