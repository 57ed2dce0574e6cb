//! Settings loading and merging logic.
//!
//! # Settings Hierarchy
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User settings** - `~/.hieragit/config.toml`
//! 3. **Project settings** - `./.hieragit/config.toml`
//! 4. **CLI arguments** - Applied by the caller (highest priority)

use crate::config::types::{
    CredentialSettings, GitSettings, HieraSettings, HieragitConfig, StorageSettings,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SETTINGS_DIR: &str = ".hieragit";
const SETTINGS_FILE: &str = "config.toml";

/// Load settings from the user and project settings files.
///
/// # Errors
///
/// Returns an error if a settings file exists but cannot be read or parsed,
/// or if the merged settings fail validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<HieragitConfig, ConfigError> {
    let user_dir = dirs::home_dir().map(|home| home.join(SETTINGS_DIR));
    let project_dir = std::env::current_dir()?.join(SETTINGS_DIR);
    load_hierarchy_from(user_dir.as_deref(), &project_dir)
}

/// Load settings from explicit user and project settings directories.
pub fn load_hierarchy_from(
    user_dir: Option<&Path>,
    project_dir: &Path,
) -> Result<HieragitConfig, ConfigError> {
    let mut config = HieragitConfig::default();

    let mut layers: Vec<PathBuf> = Vec::new();
    if let Some(dir) = user_dir {
        layers.push(dir.join(SETTINGS_FILE));
    }
    layers.push(project_dir.join(SETTINGS_FILE));

    for path in layers {
        match load_config_file(&path) {
            Ok(layer) => {
                debug!(event = "core.config.layer_loaded", path = %path.display());
                config = merge_configs(config, layer);
            }
            Err(ConfigError::ConfigNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    info!(
        event = "core.config.load_completed",
        storage = config.storage.kind(),
        hiera_config = %config.hiera.config_path().display()
    );

    Ok(config)
}

/// Load a single settings file.
pub fn load_config_file(path: &Path) -> Result<HieragitConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two settings values, with `override_config` taking precedence
/// field by field.
pub fn merge_configs(base: HieragitConfig, override_config: HieragitConfig) -> HieragitConfig {
    HieragitConfig {
        hiera: HieraSettings {
            config: override_config.hiera.config.or(base.hiera.config),
        },
        storage: StorageSettings {
            kind: override_config.storage.kind.or(base.storage.kind),
        },
        git: GitSettings {
            repo: override_config.git.repo.or(base.git.repo),
            remote: override_config.git.remote.or(base.git.remote),
            author_name: override_config.git.author_name.or(base.git.author_name),
            author_email: override_config.git.author_email.or(base.git.author_email),
            credentials: CredentialSettings {
                strategy: override_config
                    .git
                    .credentials
                    .strategy
                    .or(base.git.credentials.strategy),
                username: override_config
                    .git
                    .credentials
                    .username
                    .or(base.git.credentials.username),
                token_env: override_config
                    .git
                    .credentials
                    .token_env
                    .or(base.git.credentials.token_env),
            },
        },
    }
}
