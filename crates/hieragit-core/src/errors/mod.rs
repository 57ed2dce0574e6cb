use std::error::Error;

/// Base trait for all hieragit errors
pub trait HieraError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the library
pub type HieraResult<T> = Result<T, Box<dyn HieraError>>;

/// Errors raised while loading the tool's own settings files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse settings file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid settings: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading settings: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl HieraError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "SETTINGS_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "SETTINGS_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_SETTINGS",
            ConfigError::IoError { .. } => "SETTINGS_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiera_result() {
        let _result: HieraResult<i32> = Ok(42);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::InvalidConfiguration {
            message: "unknown storage kind 'svn'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid settings: unknown storage kind 'svn'"
        );
        assert_eq!(error.error_code(), "INVALID_SETTINGS");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_parse_error() {
        let error = ConfigError::ConfigParseError {
            path: "/home/u/.hieragit/config.toml".to_string(),
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse settings file '/home/u/.hieragit/config.toml': invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "SETTINGS_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let error = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(error.error_code(), "SETTINGS_IO_ERROR");
        assert!(!error.is_user_error());
    }
}
