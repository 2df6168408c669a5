//! Error types for Asymptote

use std::collections::TryReserveError;

use thiserror::Error;

/// Main error type for Asymptote operations
#[derive(Debug, Error)]
pub enum AsymptoteError {
    /// Invalid benchmark configuration, detected before any trial runs
    #[error("Usage error: {0}")]
    Usage(String),

    /// Failure writing a report or reading a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Asymptote operations
pub type Result<T> = std::result::Result<T, AsymptoteError>;

/// A subject call ran out of memory or another bounded resource.
///
/// Subjects return this instead of aborting, so that a single oversized
/// trial cannot take the whole benchmark run down with it. The runner treats
/// it as a failed trial rather than a fatal error.
///
/// # Example
///
/// ```
/// use asymptote_core::ResourceExhausted;
///
/// let mut table: Vec<bool> = Vec::new();
/// let err: ResourceExhausted = table.try_reserve_exact(usize::MAX).unwrap_err().into();
/// assert!(err.to_string().starts_with("resource exhausted"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("resource exhausted: {resource}")]
pub struct ResourceExhausted {
    /// Human readable description of the exhausted resource.
    pub resource: String,
}

impl ResourceExhausted {
    /// Creates a new resource exhaustion marker.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

impl From<TryReserveError> for ResourceExhausted {
    fn from(err: TryReserveError) -> Self {
        Self::new(format!("memory ({err})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let err = AsymptoteError::Usage("empty size list".to_string());
        assert_eq!(err.to_string(), "Usage error: empty size list");
    }

    #[test]
    fn test_resource_exhausted_from_try_reserve() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        let exhausted = ResourceExhausted::from(err);
        assert!(exhausted.resource.starts_with("memory"));
    }
}
