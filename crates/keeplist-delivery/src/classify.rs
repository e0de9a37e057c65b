//! Pure decision logic for the delivery retry loop.
//!
//! The imperative driver in [`crate::client`] performs the sleeps and the
//! actual wire calls; the decisions (retry or give up, and how long to
//! wait) live here so they can be tested without a network or a clock.

use std::time::Duration;

use keeplist_core::defaults::{INBOX_RATE_LIMIT_CODE, RETRY_ELIGIBILITY_WINDOW};
use keeplist_core::Error;

use crate::types::InboxResponse;

/// Observed result of one wire attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// Response decoded and carried the success code.
    Delivered(InboxResponse),
    /// Connection, timeout, or body-decode failure.
    Transport(String),
    /// The endpoint reported an application-level error code.
    Api {
        code: String,
        message: Option<String>,
    },
}

impl AttemptOutcome {
    /// Error equivalent of a failed attempt. `Delivered` has none.
    pub fn to_error(&self) -> Option<Error> {
        match self {
            AttemptOutcome::Delivered(_) => None,
            AttemptOutcome::Transport(msg) => Some(Error::Request(msg.clone())),
            AttemptOutcome::Api { code, message } => {
                Some(Error::api(code.clone(), message.clone()))
            }
        }
    }
}

/// What the retry loop should do with an attempt's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The item was accepted; stop.
    Success,
    /// The failure may be transient; try again if attempts remain.
    Retry,
    /// Retrying would keep hammering a persistently failing request; stop.
    Terminal,
}

impl Disposition {
    /// Classify an attempt outcome given how many retries have been spent.
    ///
    /// Transport failures and rate limits are always retryable. Any other
    /// endpoint-reported error is retryable only while fewer than
    /// [`RETRY_ELIGIBILITY_WINDOW`] retries have been spent.
    pub fn of(outcome: &AttemptOutcome, retries_spent: u32) -> Self {
        match outcome {
            AttemptOutcome::Delivered(_) => Disposition::Success,
            AttemptOutcome::Transport(_) => Disposition::Retry,
            AttemptOutcome::Api { code, .. } => {
                if code == INBOX_RATE_LIMIT_CODE || retries_spent < RETRY_ELIGIBILITY_WINDOW {
                    Disposition::Retry
                } else {
                    Disposition::Terminal
                }
            }
        }
    }
}

/// Exponential backoff with multiplicative jitter.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Cap applied after jitter, in milliseconds.
    pub max_delay_ms: u64,
}

impl Backoff {
    /// Delay for the given retry number: `base × 2^retry × jitter`, capped.
    ///
    /// Pure; the caller draws `jitter` (uniform in `[0.5, 1.5)` in
    /// production, `1.0` in tests).
    pub fn delay(&self, retry: u32, jitter: f64) -> Duration {
        let exponential = self.base_delay_ms as f64 * 2f64.powi(retry.min(63) as i32);
        let capped = (exponential * jitter).min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }

    /// Delay with a freshly drawn jitter factor.
    pub fn jittered<R: rand::Rng>(&self, retry: u32, rng: &mut R) -> Duration {
        self.delay(retry, rng.gen_range(0.5..1.5))
    }
}
