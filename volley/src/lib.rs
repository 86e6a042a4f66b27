#![cfg_attr(docsrs, feature(doc_cfg))]
//! Bounded-concurrency HTTP load generation.
//!
//! A run issues a fixed number of GET requests against one URL, never letting more than a
//! configured number execute at once, and reports the latency distribution of the requests that
//! succeeded.
//!
//! ```no_run
//! use volley::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), volley::Error> {
//!     let report = LoadTest::new("http://localhost:8001/api/test1")
//!         .requests(500)
//!         .concurrency(25)
//!         .await?;
//!
//!     if let Summary::Measured { statistics, .. } = report.summary {
//!         println!("{statistics}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod dispatcher;
pub mod executor;
pub mod gate;
pub mod statistics;
pub mod timer;

mod error;
mod http;

pub use error::Error;
pub use http::HttpTransport;
pub use load_test::{run, run_with, LoadTest, RunReport, Summary};

pub mod prelude {
    pub use crate::executor::{RequestError, Transport};
    pub use crate::load_test::{LoadTest, RunReport, Summary};

    pub use volley_core::{AggregatedResults, AllFailed, Outcome, RunConfig, Statistics};
}
