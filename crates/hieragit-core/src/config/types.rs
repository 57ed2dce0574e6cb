//! Settings type definitions for hieragit.
//!
//! These types are deserialized from TOML settings files. They describe how
//! the tool reaches the Hiera config and which storage backend it writes
//! through; the Hiera config itself is data and lives in [`crate::store`].
//!
//! # Example Settings
//!
//! ```toml
//! [hiera]
//! config = "/etc/puppetlabs/puppet/hiera.yaml"
//!
//! [storage]
//! kind = "git"
//!
//! [git]
//! remote = "origin"
//! author_name = "hieragit"
//! author_email = "hieragit@localhost"
//!
//! [git.credentials]
//! strategy = "token"
//! username = "deploy"
//! token_env = "HIERAGIT_TOKEN"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main settings loaded from TOML files.
///
/// Loaded from:
/// 1. User settings: `~/.hieragit/config.toml`
/// 2. Project settings: `./.hieragit/config.toml`
///
/// Project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HieragitConfig {
    #[serde(default)]
    pub hiera: HieraSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub git: GitSettings,
}

/// Where the top-level Hiera config lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HieraSettings {
    /// Path to `hiera.yaml`. Default: `hiera.yaml` in the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
}

/// Which storage variant to construct.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    /// One of: local, git. Default: local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Settings for the versioned (git) storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GitSettings {
    /// Repository work tree. Default: discovered from the Hiera config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<PathBuf>,

    /// Remote to push to. Default: origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,

    #[serde(default)]
    pub credentials: CredentialSettings,
}

/// Push credential settings.
///
/// Only the strategy and where the token comes from are configured here;
/// the token value itself is read from the environment when the backend is
/// constructed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialSettings {
    /// One of: ssh-agent, token. Default: ssh-agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Username offered to the remote. Default: the URL's user, else "git".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Environment variable holding the plaintext token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}
