//! Error types for the PathView environment abstraction.

use thiserror::Error;

/// Errors that can occur while driving playback through a context.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Operation did not finish within its time budget
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl EnvError {
    /// Creates a timeout error from the budget that was exceeded.
    pub fn timeout(budget: std::time::Duration) -> Self {
        Self::Timeout(budget.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timeout_message() {
        let err = EnvError::timeout(Duration::from_secs(2));
        assert_eq!(err.to_string(), "Timeout after 2000ms");
    }

    #[test]
    fn test_timeout_rounds_down_to_millis() {
        let err = EnvError::timeout(Duration::from_micros(1500));
        assert!(matches!(err, EnvError::Timeout(1)));
    }
}
