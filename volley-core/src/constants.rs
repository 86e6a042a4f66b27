use std::time::Duration;

/// The default number of requests issued by a run.
pub const DEFAULT_TOTAL_REQUESTS: usize = 100;

/// The default ceiling on concurrently executing requests.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// The default timeout applied to each individual request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The default timeout configured on the shared HTTP client.
pub const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Connections allowed per unit of concurrency when no explicit limit is given.
pub const CONNECTIONS_PER_SLOT: usize = 2;
