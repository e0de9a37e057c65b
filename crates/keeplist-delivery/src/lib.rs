//! # keeplist-delivery
//!
//! Reliable delivery of transformed notes to the Dynalist inbox endpoint.
//!
//! The endpoint is treated as unreliable: calls are paced with a random
//! pause, transient failures (transport errors, rate limits) are retried
//! with jittered exponential backoff, and persistent application errors are
//! cut off early. Cumulative call statistics are kept per client.

pub mod classify;
pub mod client;
pub mod stats;
pub mod types;

// Re-export commonly used types at crate root
pub use classify::{AttemptOutcome, Backoff, Disposition};
pub use client::{InboxClient, InboxConfig};
pub use stats::{CallStats, DeliveryStatus};
pub use types::{InboxRequest, InboxResponse};
