//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use thiserror::Error;

use crate::http_server::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid configuration (environment or flags)
    ConfigError,
    /// Runtime could not be started
    BootFailed,
    /// Server stopped with an error
    ServerError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOKSHELF_CLI_CONFIG_ERROR",
            Self::BootFailed => "BOOKSHELF_CLI_BOOT_FAILED",
            Self::ServerError => "BOOKSHELF_CLI_SERVER_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {}", .code.code(), .message)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServerError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::boot_failed("no runtime");
        assert_eq!(err.to_string(), "BOOKSHELF_CLI_BOOT_FAILED: no runtime");
    }

    #[test]
    fn test_from_config_error() {
        let err = CliError::from(ConfigError::InvalidPort("abc".into()));
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert!(err.message().contains("abc"));
    }
}
