//! Default volley command line runtime
//!
//! Parses arguments, optionally exposes Prometheus metrics, runs the load test and renders the
//! report.
use crate::cli::VolleyCli;
use crate::error::RuntimeError;
use crate::report::ResultsReport;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
#[allow(unused)]
use tracing::{debug, error, info, instrument, Instrument};

/// # Example
///
/// ```ignore
/// use volley_runtime::VolleyRuntime;
///
/// #[tokio::main]
/// async fn main() {
///     let report = VolleyRuntime::with_args().run().await.unwrap();
///     print!("{report}");
/// }
/// ```
pub struct VolleyRuntime {
    cli: VolleyCli,
}

impl VolleyRuntime {
    /// Use the process arguments.
    ///
    /// ```ignore
    /// $ volley http://localhost:8001/api/test1 -n 1000 -c 50
    /// $ volley https://example.com/ --timeout 750ms -o json
    /// ```
    pub fn with_args() -> Self {
        Self::from_cli(VolleyCli::parse())
    }

    pub fn from_cli(cli: VolleyCli) -> Self {
        Self { cli }
    }

    /// Run the load test and return the rendered report.
    #[instrument(name = "volley", skip_all, fields(url = %self.cli.url))]
    pub async fn run(self) -> Result<String, RuntimeError> {
        let config = self.cli.run_config()?;

        if let Some(addr) = self.cli.metrics_addr {
            PrometheusBuilder::new().with_http_listener(addr).install()?;
            info!("Serving Prometheus metrics on {addr}");
        }

        let report = volley::run(config).await?;
        ResultsReport::new(&report).render(self.cli.output)
    }
}
