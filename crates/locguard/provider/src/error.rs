//! Error types for signal acquisition.

use thiserror::Error;

/// Errors that can occur while obtaining a single signal.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The platform does not offer this signal at all. Expected, not
    /// exceptional: consumers fall back to an alternate strategy.
    #[error("signal not supported on this platform: {0}")]
    Unsupported(&'static str),

    /// The OS refused access to the signal.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other acquisition failure.
    #[error("{0}")]
    Other(String),
}

impl SignalError {
    /// Whether this error means the signal does not exist on this
    /// platform, as opposed to a failed attempt to read it.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, SignalError::Unsupported(_))
    }
}

/// Result type for signal acquisition.
pub type SignalResult<T> = Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_is_distinguished() {
        assert!(SignalError::Unsupported("app enumeration").is_unsupported());
        assert!(!SignalError::PermissionDenied("settings read".into()).is_unsupported());
    }
}
