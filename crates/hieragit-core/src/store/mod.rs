//! Config Store: loads and saves the top-level Hiera config.

pub mod errors;
pub mod handler;
pub mod types;

pub use errors::StoreError;
pub use handler::{
    get_backend_options, get_backends, get_hierarchy, load_config, resolve_datadir, save_config,
};
pub use types::{BackendOptions, HieraConfig};
