//! Error types and handling for Home Copilot
//!
//! Startup failures (missing or malformed configuration) surface through these
//! types and abort the process. Runtime failures of a webhook call are returned
//! as values and logged by the caller.

use thiserror::Error;

/// Result type alias for Home Copilot operations
pub type Result<T> = std::result::Result<T, CopilotError>;

/// Main error type for Home Copilot
#[derive(Debug, Error)]
pub enum CopilotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Missing or unusable webhook key
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },
}

impl CopilotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CopilotError::Config {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        CopilotError::Serialization {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        CopilotError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        CopilotError::Network {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        CopilotError::Auth {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        CopilotError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        CopilotError::Timeout {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CopilotError {
    fn from(err: std::io::Error) -> Self {
        CopilotError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for CopilotError {
    fn from(err: serde_yaml::Error) -> Self {
        CopilotError::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CopilotError {
    fn from(err: serde_json::Error) -> Self {
        CopilotError::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CopilotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CopilotError::timeout(err.to_string())
        } else {
            CopilotError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CopilotError::config("test config error");
        assert!(matches!(err, CopilotError::Config { .. }));

        let err = CopilotError::auth("no key");
        assert!(matches!(err, CopilotError::Auth { .. }));

        let err = CopilotError::validation("field", "test validation error");
        assert!(matches!(err, CopilotError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = CopilotError::config("test error");
        assert_eq!(format!("{}", err), "Configuration error: test error");

        let err = CopilotError::validation("TARIFF_CONFIG.LOW_TARIFF_END", "out of range");
        assert_eq!(
            format!("{}", err),
            "Validation error: TARIFF_CONFIG.LOW_TARIFF_END - out of range"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CopilotError = io.into();
        assert!(matches!(err, CopilotError::Io { .. }));
    }
}
