//! Error types for surforient

use thiserror::Error;

/// Main error type for surforient operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid search strategy: {0}")]
    InvalidStrategy(String),

    #[error("Invalid search criterion: {0}")]
    InvalidCriterion(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Orientation sink error: {0}")]
    Sink(String),
}

/// Result type alias for surforient operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidStrategy("3".to_string());
        assert_eq!(err.to_string(), "Invalid search strategy: 3");

        let err = Error::InvalidCriterion("radius must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid search criterion: radius must be positive");
    }
}
