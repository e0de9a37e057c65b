//! Cumulative statistics for inbox API calls.
//!
//! An explicit aggregator owned by the client rather than a process-wide
//! global, so tests can run against isolated instances. Counters accumulate
//! for the life of the client and are never reset.

use std::fmt;

/// Outcome label of the most recent completed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryStatus {
    /// No delivery has completed yet.
    #[default]
    Idle,
    Success,
    Failed,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Idle => write!(f, "idle"),
            DeliveryStatus::Success => write!(f, "success"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Counters for inbox API usage across one run.
///
/// `total_calls` counts logical deliveries (one per `add_to_inbox`
/// invocation), not wire attempts; `retries` counts the extra attempts.
#[derive(Debug, Clone, Default)]
pub struct CallStats {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub retries: u64,
    pub last_error: Option<String>,
    pub last_status: DeliveryStatus,
}

impl CallStats {
    /// Record the start of a logical delivery.
    pub fn start_delivery(&mut self) {
        self.total_calls += 1;
    }

    /// Record a retryable attempt failure.
    pub fn record_retry(&mut self, error: &str) {
        self.retries += 1;
        self.last_error = Some(error.to_string());
    }

    /// Record a delivery that ultimately succeeded.
    pub fn record_success(&mut self) {
        self.successful_calls += 1;
        self.last_status = DeliveryStatus::Success;
    }

    /// Record a delivery that ultimately failed.
    pub fn record_failure(&mut self, error: &str) {
        self.failed_calls += 1;
        self.last_error = Some(error.to_string());
        self.last_status = DeliveryStatus::Failed;
    }

    /// One-line summary for end-of-run reporting.
    pub fn summary(&self) -> String {
        format!(
            "{} ok, {} failed, {} retries, last status: {}",
            self.successful_calls, self.failed_calls, self.retries, self.last_status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed_and_idle() {
        let stats = CallStats::default();
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.successful_calls, 0);
        assert_eq!(stats.failed_calls, 0);
        assert_eq!(stats.retries, 0);
        assert!(stats.last_error.is_none());
        assert_eq!(stats.last_status, DeliveryStatus::Idle);
    }

    #[test]
    fn test_successful_delivery_sequence() {
        let mut stats = CallStats::default();
        stats.start_delivery();
        stats.record_success();

        assert_eq!(stats.total_calls, 1);
        assert_eq!(stats.successful_calls, 1);
        assert_eq!(stats.retries, 0);
        assert_eq!(stats.last_status, DeliveryStatus::Success);
    }

    #[test]
    fn test_retried_then_failed_delivery() {
        let mut stats = CallStats::default();
        stats.start_delivery();
        stats.record_retry("rate limited");
        stats.record_retry("rate limited");
        stats.record_failure("rate limited");

        assert_eq!(stats.total_calls, 1);
        assert_eq!(stats.failed_calls, 1);
        assert_eq!(stats.retries, 2);
        assert_eq!(stats.last_error.as_deref(), Some("rate limited"));
        assert_eq!(stats.last_status, DeliveryStatus::Failed);
    }

    #[test]
    fn test_counters_accumulate_across_deliveries() {
        let mut stats = CallStats::default();
        stats.start_delivery();
        stats.record_success();
        stats.start_delivery();
        stats.record_retry("timeout");
        stats.record_success();

        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.successful_calls, 2);
        assert_eq!(stats.retries, 1);
        assert_eq!(stats.last_status, DeliveryStatus::Success);
        // last_error is sticky; it reflects the most recent failure seen
        assert_eq!(stats.last_error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_summary_format() {
        let mut stats = CallStats::default();
        stats.start_delivery();
        stats.record_retry("x");
        stats.record_success();

        assert_eq!(stats.summary(), "1 ok, 0 failed, 1 retries, last status: success");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DeliveryStatus::Idle.to_string(), "idle");
        assert_eq!(DeliveryStatus::Success.to_string(), "success");
        assert_eq!(DeliveryStatus::Failed.to_string(), "failed");
    }
}
