//! Settings validation.

use crate::config::defaults::{VALID_CREDENTIAL_STRATEGIES, VALID_STORAGE_KINDS};
use crate::config::types::HieragitConfig;
use crate::errors::ConfigError;

/// Validate merged settings.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` for an unknown storage kind,
/// an unknown credential strategy, or a token strategy with an empty
/// `token_env`.
pub fn validate_config(config: &HieragitConfig) -> Result<(), ConfigError> {
    let kind = config.storage.kind();
    if !VALID_STORAGE_KINDS.contains(&kind) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid storage kind '{}'. Valid options: {}",
                kind,
                VALID_STORAGE_KINDS.join(", ")
            ),
        });
    }

    let strategy = config.git.credentials.strategy();
    if !VALID_CREDENTIAL_STRATEGIES.contains(&strategy) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Invalid credential strategy '{}'. Valid options: {}",
                strategy,
                VALID_CREDENTIAL_STRATEGIES.join(", ")
            ),
        });
    }

    if strategy == "token" && config.git.credentials.token_env().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "Token credentials require a non-empty token_env".to_string(),
        });
    }

    Ok(())
}
