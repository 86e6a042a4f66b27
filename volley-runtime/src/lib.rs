pub mod cli;
pub mod logging;
pub mod report;
pub mod runtime;

mod error;

pub use crate::error::RuntimeError;
pub use crate::runtime::VolleyRuntime;
