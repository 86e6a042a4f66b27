use std::time::Duration;

/// Terminal result of a single request attempt.
///
/// Both variants keep the measured latency; a failed request still took time and that time is
/// reported separately from the success distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success { latency: Duration },
    Failure { latency: Duration },
}

impl Outcome {
    pub fn success(latency: Duration) -> Self {
        Self::Success { latency }
    }

    pub fn failure(latency: Duration) -> Self {
        Self::Failure { latency }
    }

    pub fn latency(&self) -> Duration {
        match self {
            Self::Success { latency } | Self::Failure { latency } => *latency,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
