//! Shared constants used across notekeep crates.

/// Default base URL for the notes backend.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Total list-fetch attempts before giving up (1 initial + 3 retries).
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 4;

/// Delay between list-fetch attempts in milliseconds.
pub const DEFAULT_FETCH_RETRY_DELAY_MS: u64 = 2_000;
