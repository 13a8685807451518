//! Error types for the sync engine.

use thiserror::Error;

/// Rejected note fields, caught before any network call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("content cannot be empty")]
    EmptyContent,
}

/// Failures surfaced by gateway operations.
///
/// Every non-2xx status, transport fault, and response-decode fault collapses
/// into [`GatewayError::Network`]; the backend's status-code distinctions are
/// not propagated.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("network failure: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

impl GatewayError {
    /// Whether this failure was caught by the pre-network validation gate.
    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }
}
