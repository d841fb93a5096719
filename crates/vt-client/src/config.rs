use std::time::Duration;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Settings for talking to the try-on endpoint and for driving a job.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Full URL of the endpoint. Submissions POST here; status checks GET
    /// it with a `jobId` query parameter.
    pub endpoint: String,
    pub submit_timeout: Duration,
    pub status_timeout: Duration,
    pub sync_timeout: Duration,
    pub poll_interval: Duration,
    /// Status checks allowed per job before giving up.
    pub max_attempts: u32,
    /// Network failures of a status check tolerated per job. Zero makes the
    /// first one fatal.
    pub status_retries: u32,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Longest a job can spend polling, ignoring request latency.
    pub fn polling_budget(&self) -> Duration {
        self.poll_interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            status_retries: 0,
            user_agent: format!("vt-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
