//! hieragit-core: Hiera config resolution over pluggable, optionally
//! git-versioned storage.
//!
//! This library holds the business logic behind the `hieragit` CLI.
//!
//! # Main Entry Points
//!
//! - [`hiera`] - Façade over one storage backend ([`Hiera`])
//! - [`store`] - Load and save the top-level Hiera config
//! - [`overrides`] - Which keys of a data file are shadowed, and by what
//! - [`storage`] - Local and git-versioned storage variants
//! - [`git`] - Commit-and-push pipeline used by versioned storage
//! - [`config`] - Tool settings

pub mod config;
pub mod errors;
pub mod events;
pub mod format;
pub mod git;
pub mod hiera;
pub mod hierarchy;
pub mod logging;
pub mod overrides;
pub mod storage;
pub mod store;

// Re-export commonly used types at crate root for convenience
pub use config::HieragitConfig;
pub use errors::{ConfigError, HieraError, HieraResult};
pub use format::{DataFormat, DataMap};
pub use git::{CommitError, CommitTransaction, PipelineStep};
pub use hiera::{DataFileError, Hiera};
pub use hierarchy::HierarchyError;
pub use overrides::{OverrideEntry, OverrideError, Overrides};
pub use storage::{LocalStorage, Storage, StorageBackend, StorageError, VersionedStorage};
pub use store::{BackendOptions, HieraConfig, StoreError};

// Re-export handler modules as the primary API
pub use overrides::engine as override_ops;
pub use store::handler as store_ops;

// Re-export logging initialization
pub use logging::init_logging;
