pub mod errors;
pub mod resolver;

pub use errors::HierarchyError;
pub use resolver::{level_file, resolve_search_order, target_level};
