use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::debug;
use vt_client::ClientConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load settings from the environment, after an optional `.env` file.
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("failed to read .env"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = ClientConfig::new(lookup("TRYON_API_ENDPOINT").unwrap_or_default());

        let client = ClientConfig {
            submit_timeout: secs(&lookup, "TRYON_SUBMIT_TIMEOUT_SECS", defaults.submit_timeout)?,
            status_timeout: secs(&lookup, "TRYON_STATUS_TIMEOUT_SECS", defaults.status_timeout)?,
            sync_timeout: secs(&lookup, "TRYON_SYNC_TIMEOUT_SECS", defaults.sync_timeout)?,
            poll_interval: secs(&lookup, "TRYON_POLL_INTERVAL_SECS", defaults.poll_interval)?,
            max_attempts: parse(&lookup, "TRYON_MAX_ATTEMPTS", defaults.max_attempts)?,
            status_retries: parse(&lookup, "TRYON_STATUS_RETRIES", defaults.status_retries)?,
            ..defaults
        };

        Ok(Self { client })
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.client.endpoint = endpoint;
        }
        self
    }

    pub fn validated(self) -> anyhow::Result<Self> {
        if self.client.endpoint.trim().is_empty() {
            bail!("no endpoint configured: set TRYON_API_ENDPOINT or pass --endpoint");
        }
        if self.client.max_attempts == 0 {
            bail!("TRYON_MAX_ATTEMPTS must be at least 1");
        }
        Ok(self)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> anyhow::Result<Duration> {
    parse(lookup, key, default.as_secs()).map(Duration::from_secs)
}
