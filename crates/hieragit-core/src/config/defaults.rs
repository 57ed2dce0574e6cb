//! Default values for settings.
//!
//! The settings structs keep every field optional so that layered merging can
//! tell "unset" from "set to the default"; these accessors supply the
//! fallback at the point of use.

use crate::config::types::{CredentialSettings, GitSettings, HieraSettings, StorageSettings};
use std::path::{Path, PathBuf};

pub const DEFAULT_HIERA_CONFIG: &str = "hiera.yaml";
pub const DEFAULT_STORAGE_KIND: &str = "local";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_AUTHOR_NAME: &str = "hieragit";
pub const DEFAULT_AUTHOR_EMAIL: &str = "hieragit@localhost";
pub const DEFAULT_CREDENTIAL_STRATEGY: &str = "ssh-agent";
pub const DEFAULT_TOKEN_ENV: &str = "HIERAGIT_TOKEN";

/// Storage kinds accepted in `storage.kind`.
pub const VALID_STORAGE_KINDS: &[&str] = &["local", "git"];

/// Credential strategies accepted in `git.credentials.strategy`.
pub const VALID_CREDENTIAL_STRATEGIES: &[&str] = &["ssh-agent", "token"];

impl HieraSettings {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIERA_CONFIG))
    }
}

impl StorageSettings {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_STORAGE_KIND)
    }
}

impl GitSettings {
    pub fn remote(&self) -> &str {
        self.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    pub fn author_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or(DEFAULT_AUTHOR_NAME)
    }

    pub fn author_email(&self) -> &str {
        self.author_email.as_deref().unwrap_or(DEFAULT_AUTHOR_EMAIL)
    }

    /// Repository to open, falling back to discovery from `start`.
    pub fn repo_or<'a>(&'a self, start: &'a Path) -> &'a Path {
        self.repo.as_deref().unwrap_or(start)
    }
}

impl CredentialSettings {
    pub fn strategy(&self) -> &str {
        self.strategy
            .as_deref()
            .unwrap_or(DEFAULT_CREDENTIAL_STRATEGY)
    }

    pub fn token_env(&self) -> &str {
        self.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::HieragitConfig;

    #[test]
    fn test_defaults_when_unset() {
        let config = HieragitConfig::default();
        assert_eq!(config.hiera.config_path(), PathBuf::from("hiera.yaml"));
        assert_eq!(config.storage.kind(), "local");
        assert_eq!(config.git.remote(), "origin");
        assert_eq!(config.git.author_name(), "hieragit");
        assert_eq!(config.git.author_email(), "hieragit@localhost");
        assert_eq!(config.git.credentials.strategy(), "ssh-agent");
        assert_eq!(config.git.credentials.token_env(), "HIERAGIT_TOKEN");
    }

    #[test]
    fn test_repo_or_prefers_configured_repo() {
        let mut git = GitSettings::default();
        let start = Path::new("/etc/puppetlabs");
        assert_eq!(git.repo_or(start), start);

        git.repo = Some(PathBuf::from("/srv/hieradata"));
        assert_eq!(git.repo_or(start), Path::new("/srv/hieradata"));
    }
}
