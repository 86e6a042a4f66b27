use std::process::ExitCode;
use tracing::error;
use volley_runtime::{logging, VolleyRuntime};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match VolleyRuntime::with_args().run().await {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("volley: {err}");
            ExitCode::FAILURE
        }
    }
}
