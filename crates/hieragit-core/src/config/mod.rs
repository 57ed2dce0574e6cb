//! # Settings System
//!
//! Layered TOML settings for hieragit itself (not the Hiera config, which is
//! handled by [`crate::store`]).
//!
//! ## Settings Hierarchy
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User settings** - `~/.hieragit/config.toml`
//! 3. **Project settings** - `./.hieragit/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Settings
//!
//! ```rust,no_run
//! use hieragit_core::config::HieragitConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HieragitConfig::load_hierarchy()?;
//!     println!("hiera config at {}", config.hiera.config_path().display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{CredentialSettings, GitSettings, HieraSettings, HieragitConfig, StorageSettings};
pub use validation::validate_config;

impl HieragitConfig {
    /// Load settings from the hierarchy of settings files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
