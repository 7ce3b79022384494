//! Retrying HTTP probe for service health endpoints.
//!
//! Health probes run while the service may still be starting, so
//! network-level failures are retried on a fixed schedule: one request in
//! flight at a time, a constant inter-attempt delay, no backoff or jitter.
//! Once any HTTP response arrives the retry loop ends and the full body is
//! handed to a [`ResponseValidator`].
//!
//! Retry exhaustion is an explicit [`ProbeError::RetriesExhausted`] so a
//! service that never comes up fails the test instead of silently passing.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::health::ValidationError;

/// Retry schedule for health probes.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed delay between consecutive attempts.
    pub retry_delay: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: 9,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Probe failures.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gave up after {attempts} attempts, last error: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("response validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation strategy applied to a probe response body.
///
/// The structured actuator document and the literal `/v1/hc` body share one
/// retry loop and differ only in how the body is checked.
pub trait ResponseValidator {
    /// Short name used in log messages.
    fn describe(&self) -> &str;

    /// Check the full response body.
    fn validate(&self, body: &str) -> Result<(), ValidationError>;
}

/// Every attempt of a retry loop failed.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts, last error: {last_error}")]
pub struct RetryExhausted<E: Display + std::fmt::Debug> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `attempt` until it succeeds, sleeping `config.retry_delay` between
/// failures, for at most `config.max_attempts` attempts.
///
/// Attempts are strictly sequential. The closure receives the 1-based
/// attempt number.
pub async fn retry_until_ok<T, E, F, Fut>(
    config: &ProbeConfig,
    mut attempt: F,
) -> Result<T, RetryExhausted<E>>
where
    E: Display + std::fmt::Debug,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt(attempts).await {
            Ok(value) => return Ok(value),
            Err(err) if attempts < config.max_attempts => {
                warn!(
                    attempt = attempts,
                    max_attempts = config.max_attempts,
                    error = %err,
                    delay = ?config.retry_delay,
                    "attempt failed, retrying after delay"
                );
                sleep(config.retry_delay).await;
            }
            Err(err) => {
                return Err(RetryExhausted {
                    attempts,
                    last_error: err,
                })
            }
        }
    }
}

/// Retrying HTTP prober parameterized by a response validator.
pub struct Prober {
    client: reqwest::Client,
    config: ProbeConfig,
}

impl Prober {
    /// Build a prober with a 10 second per-request timeout.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    /// GET `url` with retries, then run the validator over the body.
    pub async fn probe(
        &self,
        url: &str,
        validator: &dyn ResponseValidator,
    ) -> Result<(), ProbeError> {
        info!(%url, validator = validator.describe(), "probing");
        let body = self.fetch_with_retry(url).await?;
        validator.validate(&body)?;
        info!(%url, validator = validator.describe(), "probe passed");
        Ok(())
    }

    /// GET `url`, retrying network-level send failures on the fixed schedule.
    ///
    /// Any HTTP response ends the retry loop regardless of status code; the
    /// validator sees the body either way.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<String, ProbeError> {
        let client = &self.client;
        let response = retry_until_ok(&self.config, |_| client.get(url).send())
            .await
            .map_err(|exhausted| ProbeError::RetriesExhausted {
                attempts: exhausted.attempts,
                last_error: exhausted.last_error.to_string(),
            })?;
        Ok(response.text().await?)
    }
}
