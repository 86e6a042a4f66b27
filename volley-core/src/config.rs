use crate::constants::{
    CONNECTIONS_PER_SLOT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TOTAL_TIMEOUT,
};
use crate::error::ConfigError;
use humantime::format_duration;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;
use url::Url;

/// HTTP client pool policy for a single run.
///
/// Owned by the dispatcher for the duration of the run and dropped with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on outbound calls the client may have open at once.
    pub max_connections: NonZeroUsize,
    /// Idle keep-alive connections retained per host.
    pub max_idle_connections: usize,
    /// Timeout for each individual request, including reading the body.
    pub per_request_timeout: Duration,
    /// Client-wide timeout, applied to anything issued without an explicit per-request timeout.
    pub total_timeout: Duration,
}

impl ClientConfig {
    /// Pool sizing derived from the concurrency ceiling: `C` idle connections and `2C` total.
    pub fn for_concurrency(max_concurrency: NonZeroUsize) -> Self {
        let max_connections = max_concurrency.saturating_mul(
            NonZeroUsize::new(CONNECTIONS_PER_SLOT).unwrap_or(NonZeroUsize::MIN),
        );
        Self {
            max_connections,
            max_idle_connections: max_concurrency.get(),
            per_request_timeout: DEFAULT_REQUEST_TIMEOUT,
            total_timeout: DEFAULT_TOTAL_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("per-request timeout"));
        }
        if self.total_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("total timeout"));
        }
        Ok(())
    }
}

/// Immutable description of a single load run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    url: Url,
    total_requests: NonZeroUsize,
    max_concurrency: NonZeroUsize,
    client: ClientConfig,
}

impl RunConfig {
    /// Validate the inputs of a run. Fails before any network activity can take place.
    ///
    /// The client policy defaults to [`ClientConfig::for_concurrency`].
    pub fn new(
        url: &str,
        total_requests: usize,
        max_concurrency: usize,
    ) -> Result<Self, ConfigError> {
        let url = parse_target(url)?;
        let total_requests = non_zero("total requests", total_requests)?;
        let max_concurrency = non_zero("max concurrency", max_concurrency)?;

        Ok(Self {
            url,
            total_requests,
            max_concurrency,
            client: ClientConfig::for_concurrency(max_concurrency),
        })
    }

    pub fn with_client(mut self, client: ClientConfig) -> Result<Self, ConfigError> {
        client.validate()?;
        self.client = client;
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn total_requests(&self) -> NonZeroUsize {
        self.total_requests
    }

    pub fn max_concurrency(&self) -> NonZeroUsize {
        self.max_concurrency
    }

    pub fn client(&self) -> &ClientConfig {
        &self.client
    }

    pub fn per_request_timeout(&self) -> Duration {
        self.client.per_request_timeout
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url={}, requests={}, concurrency={}, timeout={}",
            self.url,
            self.total_requests,
            self.max_concurrency,
            format_duration(self.client.per_request_timeout),
        )
    }
}

/// Convert a signed count into a non-zero one, naming the offending field on failure.
pub fn positive(field: &'static str, value: i64) -> Result<NonZeroUsize, ConfigError> {
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ConfigError::NonPositive { field, value })
}

fn non_zero(field: &'static str, value: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(value).ok_or(ConfigError::NonPositive { field, value: 0 })
}

/// Parse a target URL, accepting only http and https.
pub fn parse_target(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
