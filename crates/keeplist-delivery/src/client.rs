//! Dynalist inbox client with pacing, bounded retries, and backoff.
//!
//! The endpoint rate-limits aggressively, so every attempt is preceded by a
//! random pacing pause and retryable failures back off exponentially. The
//! retry decisions themselves are pure (see [`crate::classify`]); this
//! module is the imperative shell that performs the wire calls and sleeps.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use keeplist_core::defaults::{
    BACKOFF_BASE_DELAY_MS, BACKOFF_MAX_DELAY_MS, DELIVERY_MAX_RETRIES, DELIVERY_TIMEOUT_SECS,
    INBOX_API_URL, PACE_MAX_MS, PACE_MIN_MS,
};
use keeplist_core::{Error, Result};

use crate::classify::{AttemptOutcome, Backoff, Disposition};
use crate::stats::CallStats;
use crate::types::{InboxRequest, InboxResponse};

/// Configuration for the inbox client.
#[derive(Debug, Clone)]
pub struct InboxConfig {
    /// Inbox endpoint URL.
    pub api_url: String,
    /// Dynalist API token. Must be non-empty.
    pub token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum retries per delivery (total attempts = retries + 1).
    pub max_retries: u32,
    /// Backoff base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds.
    pub max_delay_ms: u64,
    /// Lower bound of the pacing pause before each attempt, in milliseconds.
    pub pace_min_ms: u64,
    /// Upper bound of the pacing pause; zero disables pacing entirely.
    pub pace_max_ms: u64,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            api_url: INBOX_API_URL.to_string(),
            token: String::new(),
            timeout_secs: DELIVERY_TIMEOUT_SECS,
            max_retries: DELIVERY_MAX_RETRIES,
            base_delay_ms: BACKOFF_BASE_DELAY_MS,
            max_delay_ms: BACKOFF_MAX_DELAY_MS,
            pace_min_ms: PACE_MIN_MS,
            pace_max_ms: PACE_MAX_MS,
        }
    }
}

impl InboxConfig {
    /// Create a config with the given token and defaults for everything else.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    /// Create config from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `DYNALIST_TOKEN` | (required) | API token |
    /// | `DYNALIST_API_URL` | inbox/add endpoint | Endpoint override |
    /// | `DYNALIST_TIMEOUT` | `30` | Request timeout in seconds |
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("DYNALIST_TOKEN")
            .map_err(|_| Error::Config("DYNALIST_TOKEN must be set".to_string()))?;

        Ok(Self {
            api_url: std::env::var("DYNALIST_API_URL")
                .unwrap_or_else(|_| INBOX_API_URL.to_string()),
            token,
            timeout_secs: std::env::var("DYNALIST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DELIVERY_TIMEOUT_SECS),
            ..Default::default()
        })
    }
}

/// Client for the Dynalist inbox endpoint.
pub struct InboxClient {
    client: Client,
    config: InboxConfig,
    stats: Mutex<CallStats>,
}

impl InboxClient {
    /// Create a new inbox client. Fails fast on an empty token.
    pub fn new(config: InboxConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(Error::Config("inbox token must be non-empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            api_url = %config.api_url,
            max_retries = config.max_retries,
            "Initializing inbox client"
        );

        Ok(Self {
            client,
            config,
            stats: Mutex::new(CallStats::default()),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(InboxConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Snapshot of the cumulative call statistics.
    pub fn stats(&self) -> CallStats {
        self.lock_stats().clone()
    }

    fn lock_stats(&self) -> MutexGuard<'_, CallStats> {
        self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Random pause before an attempt, to avoid bursting the endpoint.
    async fn pace(&self) {
        let (lo, hi) = (
            self.config.pace_min_ms.min(self.config.pace_max_ms),
            self.config.pace_min_ms.max(self.config.pace_max_ms),
        );
        if hi == 0 {
            return;
        }
        let pause_ms = {
            use rand::Rng;
            rand::thread_rng().gen_range(lo..=hi)
        };
        sleep(Duration::from_millis(pause_ms)).await;
    }

    /// One wire attempt: send the request and decode the response.
    async fn attempt(&self, request: &InboxRequest) -> AttemptOutcome {
        let response = match self.client.post(&self.config.api_url).json(request).send().await {
            Ok(r) => r,
            Err(e) => {
                return AttemptOutcome::Transport(format!("failed to send request: {}", e));
            }
        };

        let decoded: InboxResponse = match response.json().await {
            Ok(d) => d,
            Err(e) => {
                return AttemptOutcome::Transport(format!("failed to decode response: {}", e));
            }
        };

        if decoded.is_ok() {
            AttemptOutcome::Delivered(decoded)
        } else {
            AttemptOutcome::Api {
                code: decoded.code,
                message: decoded.message,
            }
        }
    }

    /// Deliver one content/note pair, retrying transient failures.
    ///
    /// Blocks through pacing pauses and backoff waits; this throttling is
    /// the mechanism that keeps sequential migration under the endpoint's
    /// rate limit. Returns the decoded response on success or the last
    /// observed error once retries are exhausted or the failure is
    /// classified terminal.
    pub async fn add_to_inbox(&self, content: &str, note: &str) -> Result<InboxResponse> {
        let request = InboxRequest::new(self.config.token.clone(), content, note);
        let backoff = Backoff {
            base_delay_ms: self.config.base_delay_ms,
            max_delay_ms: self.config.max_delay_ms,
        };

        self.lock_stats().start_delivery();

        let mut retries: u32 = 0;
        loop {
            self.pace().await;

            let outcome = self.attempt(&request).await;

            match Disposition::of(&outcome, retries) {
                Disposition::Success => {
                    if let AttemptOutcome::Delivered(response) = outcome {
                        self.lock_stats().record_success();
                        debug!(
                            node_id = response.node_id.as_deref().unwrap_or(""),
                            retries, "Inbox item delivered"
                        );
                        return Ok(response);
                    }
                    return Err(Error::Internal(
                        "success disposition without a response".to_string(),
                    ));
                }
                Disposition::Terminal => {
                    let error = outcome
                        .to_error()
                        .unwrap_or_else(|| Error::Internal("unclassified failure".to_string()));
                    self.lock_stats().record_failure(&error.to_string());
                    warn!(error = %error, retries, "Inbox delivery failed terminally");
                    return Err(error);
                }
                Disposition::Retry => {
                    let error = outcome
                        .to_error()
                        .unwrap_or_else(|| Error::Internal("unclassified failure".to_string()));

                    if retries >= self.config.max_retries {
                        self.lock_stats().record_failure(&error.to_string());
                        warn!(error = %error, retries, "Inbox delivery exhausted retries");
                        return Err(error);
                    }

                    retries += 1;
                    self.lock_stats().record_retry(&error.to_string());

                    let delay = {
                        let mut rng = rand::thread_rng();
                        backoff.jittered(retries, &mut rng)
                    };
                    warn!(
                        error = %error,
                        retry = retries,
                        delay_ms = delay.as_millis() as u64,
                        "Inbox call failed, backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InboxConfig::default();
        assert_eq!(config.api_url, INBOX_API_URL);
        assert_eq!(config.timeout_secs, DELIVERY_TIMEOUT_SECS);
        assert_eq!(config.max_retries, DELIVERY_MAX_RETRIES);
        assert_eq!(config.base_delay_ms, BACKOFF_BASE_DELAY_MS);
        assert_eq!(config.max_delay_ms, BACKOFF_MAX_DELAY_MS);
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_with_token() {
        let config = InboxConfig::with_token("secret");
        assert_eq!(config.token, "secret");
        assert_eq!(config.api_url, INBOX_API_URL);
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = InboxClient::new(InboxConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_whitespace_token_rejected() {
        let result = InboxClient::new(InboxConfig::with_token("   "));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_client_creation() {
        let client = InboxClient::new(InboxConfig::with_token("tok")).unwrap();
        assert_eq!(client.config().token, "tok");
        let stats = client.stats();
        assert_eq!(stats.total_calls, 0);
    }
}
