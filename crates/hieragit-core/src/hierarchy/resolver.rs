//! Hierarchy search-order resolution.
//!
//! Priority decreases with index: a key at an earlier level shadows the same
//! key at any later level. Levels below a target can never shadow it, so
//! only the levels above it are searched.

use super::errors::HierarchyError;

/// Levels strictly above `target_level`, highest priority first.
///
/// # Errors
///
/// Returns `HierarchyError::LevelNotFound` when `target_level` is not an
/// exact entry of `hierarchy`.
pub fn resolve_search_order<'a>(
    hierarchy: &'a [String],
    target_level: &str,
) -> Result<&'a [String], HierarchyError> {
    let position = hierarchy
        .iter()
        .position(|level| level == target_level)
        .ok_or_else(|| HierarchyError::LevelNotFound {
            level: target_level.to_string(),
            hierarchy: hierarchy.join(", "),
        })?;

    Ok(&hierarchy[..position])
}

/// Hierarchy level named by a data file: the file name with its
/// `.<backend>` suffix removed (`nodes/web01.yaml` -> `nodes/web01`).
pub fn target_level<'a>(file: &'a str, backend: &str) -> &'a str {
    file.strip_suffix(backend)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(file)
}

/// Data file name for a level under `backend`.
pub fn level_file(level: &str, backend: &str) -> String {
    format!("{level}.{backend}")
}
