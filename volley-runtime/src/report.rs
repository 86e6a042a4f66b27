//! Rendering of a finished run for stdout.
use crate::cli::OutputFormat;
use crate::error::RuntimeError;
use serde::Serialize;
use std::fmt::Write;
use volley::{RunReport, Summary};
use volley_core::{AggregatedResults, Statistics};

const BANNER_WIDTH: usize = 50;
const ALL_FAILED: &str = "All requests failed.";

pub struct ResultsReport<'a> {
    report: &'a RunReport,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    url: &'a str,
    total_requests: usize,
    max_concurrency: usize,
    total_time_secs: f64,
    success_count: usize,
    failure_count: usize,
    peak_concurrency: usize,
    all_failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a Statistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_mean_secs: Option<f64>,
}

impl<'a> ResultsReport<'a> {
    pub fn new(report: &'a RunReport) -> Self {
        Self { report }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, RuntimeError> {
        match format {
            OutputFormat::Text => Ok(self.format_text()),
            OutputFormat::Json => self.format_json(),
        }
    }

    fn results(&self) -> &AggregatedResults {
        match &self.report.summary {
            Summary::Measured { results, .. } => results,
            Summary::AllFailed(all_failed) => &all_failed.0,
        }
    }

    /// Human readable report. An all-failed run prints a single line and no statistics.
    pub fn format_text(&self) -> String {
        let Summary::Measured {
            results,
            statistics,
        } = &self.report.summary
        else {
            return format!("{ALL_FAILED}\n");
        };
        let config = &self.report.config;
        let banner = "=".repeat(BANNER_WIDTH);

        // Writing into a String cannot fail.
        let mut out = String::new();
        let _ = writeln!(out, "\n{banner}");
        let _ = writeln!(out, "BENCHMARK RESULTS");
        let _ = writeln!(out, "{banner}");
        let _ = writeln!(out, "URL: {}", config.url());
        let _ = writeln!(out, "Total requests: {}", config.total_requests());
        let _ = writeln!(out, "Max concurrency: {}", config.max_concurrency());
        let _ = writeln!(
            out,
            "Total time: {:.2} s",
            results.total_wall_clock.as_secs_f64()
        );
        let _ = writeln!(out, "Successful requests: {}", results.success_count);
        let _ = writeln!(out, "Failed requests: {}", results.failure_count);
        let _ = writeln!(
            out,
            "Requests per second (RPS): {:.2}",
            statistics.throughput_per_second
        );
        let _ = writeln!(out, "\nResponse time (successful, s):");
        for (label, value) in [
            ("Mean", statistics.mean),
            ("Median", statistics.median),
            ("p90", statistics.p90),
            ("p95", statistics.p95),
            ("p99", statistics.p99),
            ("Min", statistics.min),
            ("Max", statistics.max),
        ] {
            let _ = writeln!(out, "  {:<8}{:.4}", format!("{label}:"), value.as_secs_f64());
        }
        if let Some(mean) = results.failure_mean() {
            let _ = writeln!(out, "\nMean failed response time: {:.4} s", mean.as_secs_f64());
        }
        let _ = writeln!(out, "{banner}");
        out
    }

    pub fn format_json(&self) -> Result<String, RuntimeError> {
        let config = &self.report.config;
        let results = self.results();
        let statistics = match &self.report.summary {
            Summary::Measured { statistics, .. } => Some(statistics),
            Summary::AllFailed(_) => None,
        };

        let document = ReportDocument {
            url: config.url().as_str(),
            total_requests: config.total_requests().get(),
            max_concurrency: config.max_concurrency().get(),
            total_time_secs: results.total_wall_clock.as_secs_f64(),
            success_count: results.success_count,
            failure_count: results.failure_count,
            peak_concurrency: self.report.high_water_mark,
            all_failed: statistics.is_none(),
            statistics,
            failure_mean_secs: results.failure_mean().map(|d| d.as_secs_f64()),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}
