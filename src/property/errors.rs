//! Property error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store backend failure. Not-found is not an error; lookups return `None`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Backend could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// One or more input constraints were violated.
///
/// `details` is never empty and keeps field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation error: {}", .details.join("; "))]
pub struct ValidationError {
    details: Vec<String>,
}

impl ValidationError {
    /// Single-message error
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            details: vec![message.into()],
        }
    }

    /// Returns `None` when there is nothing to report.
    pub fn from_details(details: Vec<String>) -> Option<Self> {
        if details.is_empty() {
            None
        } else {
            Some(Self { details })
        }
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn into_details(self) -> Vec<String> {
        self.details
    }
}
