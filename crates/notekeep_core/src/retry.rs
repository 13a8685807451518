//! Bounded constant-delay retry for the list-fetch path.
//!
//! Only the fetch path retries automatically: retrying a failed create could
//! duplicate a record, so mutations are reported once and left to the user.

use std::time::Duration;
use tracing::warn;

use crate::constants::{DEFAULT_FETCH_ATTEMPTS, DEFAULT_FETCH_RETRY_DELAY_MS};
use crate::error::GatewayError;
use crate::gateway::NotesApi;
use crate::models::Note;

/// Retry policy for [`list_with_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Clamped to at least 1.
    pub attempts: u32,
    /// Constant delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_FETCH_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_FETCH_RETRY_DELAY_MS),
        }
    }
}

/// Fetch the full collection, retrying on failure up to the policy bound.
///
/// Returns the last error once attempts are exhausted; the caller decides how
/// to absorb it. Dropping the returned future cancels any pending delay.
pub async fn list_with_retry<G>(gateway: &G, policy: RetryPolicy) -> Result<Vec<Note>, GatewayError>
where
    G: NotesApi + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match gateway.list_notes().await {
            Ok(notes) => return Ok(notes),
            Err(err) if attempt < attempts => {
                warn!(
                    "fetch attempt {}/{} failed, retrying in {:?}: {}",
                    attempt, attempts, policy.delay, err
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!("fetch failed after {} attempt(s): {}", attempts, err);
                return Err(err);
            }
        }
    }
}
