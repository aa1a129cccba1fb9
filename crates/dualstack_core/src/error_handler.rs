use serde::{Deserialize, Serialize};
use thiserror::Error;

use dualstack_mapping::FormatError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum DualstackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Bad input from the user (malformed address, wrong length).
    UserError,
    /// Invalid configuration.
    ConfigError,
    /// Address book or other file storage failure.
    SystemError,
}

impl DualstackError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Format(_) => ErrorCategory::UserError,
            Self::Storage(_) => ErrorCategory::SystemError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::Format(err) => format!("Invalid input: {err}"),
            Self::Storage(_) => "Storage error. Check disk space and permissions.".into(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::ConfigError => 3,
            ErrorCategory::SystemError => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualstack_mapping::ValueKind;

    #[test]
    fn format_error_is_user_error() {
        let err: DualstackError = FormatError::InvalidLength {
            kind: ValueKind::AccountId,
            expected: 32,
            actual: 31,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert!(err.user_message().contains("expected 32 bytes, got 31"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn storage_message_hides_details() {
        let err = DualstackError::Storage("/secret/path: EACCES".into());
        assert_eq!(err.category(), ErrorCategory::SystemError);
        assert!(!err.user_message().contains("/secret/path"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn url_error_is_user_error() {
        let err: DualstackError = FormatError::InvalidUrl("EVM RPC URL: nope".into()).into();
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert_eq!(err.user_message(), "Invalid input: invalid EVM RPC URL: nope");
    }

    #[test]
    fn config_error_display() {
        let err = DualstackError::Config("bad prefix".into());
        assert_eq!(err.to_string(), "Configuration error: bad prefix");
        assert_eq!(err.exit_code(), 3);
    }
}
