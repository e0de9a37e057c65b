//! Centralized default constants for keeplist.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// DELIVERY
// =============================================================================

/// Dynalist inbox endpoint.
pub const INBOX_API_URL: &str = "https://dynalist.io/api/v1/inbox/add";

/// Response `_code` value signaling success.
pub const INBOX_SUCCESS_CODE: &str = "Ok";

/// Response `_code` value signaling a rate limit; always retryable.
pub const INBOX_RATE_LIMIT_CODE: &str = "TooManyRequests";

/// Maximum number of retries per delivery (total attempts = retries + 1).
pub const DELIVERY_MAX_RETRIES: u32 = 5;

/// Non-rate-limit API errors stop being retryable once this many retries
/// have been spent; a request the endpoint keeps rejecting is terminal.
pub const RETRY_ELIGIBILITY_WINDOW: u32 = 2;

/// Exponential backoff base delay in milliseconds.
pub const BACKOFF_BASE_DELAY_MS: u64 = 2_000;

/// Backoff cap in milliseconds.
pub const BACKOFF_MAX_DELAY_MS: u64 = 60_000;

/// Lower bound of the random pacing pause before each API attempt.
pub const PACE_MIN_MS: u64 = 1_000;

/// Upper bound of the random pacing pause before each API attempt.
pub const PACE_MAX_MS: u64 = 3_000;

/// HTTP request timeout for inbox calls, in seconds.
pub const DELIVERY_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// TITLES
// =============================================================================

/// Marker prefixed to every delivered title, identifying the origin system.
pub const TITLE_SOURCE_MARKER: &str = "gkeep: ";

/// Character budget for the filename-derived title base.
pub const TITLE_BASE_MAX_CHARS: usize = 20;

/// Character budget for each body-preview line appended to a title.
pub const TITLE_PREVIEW_LINE_CHARS: usize = 30;

/// Maximum number of body-preview lines appended to a title.
pub const TITLE_PREVIEW_MAX_LINES: usize = 2;

/// Separator between body-preview lines.
pub const TITLE_PREVIEW_SEPARATOR: &str = " | ";

/// Marker appended to truncated title fragments.
pub const TITLE_TRUNCATION_MARKER: &str = "...";

// =============================================================================
// STORAGE
// =============================================================================

/// HTTP request timeout for attachment uploads, in seconds.
pub const UPLOAD_TIMEOUT_SECS: u64 = 120;
