//! Error types shared by Jarvis services.

use thiserror::Error;

/// Request-level failure raised outside the valuation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or unreadable request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::InvalidInput("weights".into()).status_code(), 400);
        assert_eq!(Error::Internal("serializer".into()).status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidInput("expected value".into()).to_string(),
            "Invalid input: expected value"
        );
    }
}
