pub mod engine;
pub mod errors;
pub mod types;

pub use engine::{compute_overrides, get_overrides};
pub use errors::OverrideError;
pub use types::{OverrideEntry, Overrides};
