//! Override engine: which keys of a data file are shadowed by
//! higher-priority levels, and by what.
//!
//! The result is not a merged view. It lists only source keys that some
//! higher level also defines, with the value from the highest such level.

use std::path::Path;
use tracing::{debug, info};

use super::errors::OverrideError;
use super::types::{OverrideEntry, Overrides};
use crate::format::{DataFormat, DataMap};
use crate::hierarchy::{level_file, resolve_search_order, target_level};
use crate::storage::StorageBackend;
use crate::store;

/// Compute the overrides for `file` (relative to the backend's datadir).
///
/// # Errors
///
/// Fails when the config cannot be loaded, `backend` is unknown, the file's
/// level is not in the hierarchy, the source file is missing or
/// unparseable, or any higher-priority file exists but cannot be read or
/// parsed. Missing higher-priority files count as empty.
pub fn get_overrides(
    storage: &dyn StorageBackend,
    backend: &str,
    file: &str,
) -> Result<Overrides, OverrideError> {
    info!(
        event = "core.overrides.compute_started",
        backend = backend,
        file = file
    );

    let config = store::load_config(storage)?;
    let datadir = store::resolve_datadir(storage, &config, backend)?;
    let level = target_level(file, backend);
    let search_order = resolve_search_order(&config.hierarchy, level)?;
    let format = DataFormat::for_backend(backend);

    let source_path = datadir.join(file);
    let source = load_map(storage, format, &source_path).map_err(|e| match e {
        LoadError::Storage(e) => OverrideError::Storage(e),
        LoadError::Parse(message) => OverrideError::SourceParseError {
            path: source_path.display().to_string(),
            message,
        },
    })?;

    // Every candidate is loaded before any merging; the first failure
    // aborts the whole call.
    let candidates = search_order
        .iter()
        .map(|candidate_level| {
            let name = level_file(candidate_level, backend);
            let path = datadir.join(&name);
            match load_map(storage, format, &path) {
                Ok(map) => Ok((name, map)),
                Err(LoadError::Storage(e)) if e.is_not_found() => {
                    debug!(event = "core.overrides.candidate_missing", file = name);
                    Ok((name, DataMap::new()))
                }
                Err(LoadError::Storage(e)) => Err(OverrideError::Storage(e)),
                Err(LoadError::Parse(message)) => Err(OverrideError::CandidateParseError {
                    path: path.display().to_string(),
                    message,
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let overrides = compute_overrides(&source, &candidates);

    info!(
        event = "core.overrides.compute_completed",
        backend = backend,
        file = file,
        searched = candidates.len(),
        overridden = overrides.len()
    );

    Ok(overrides)
}

/// For each source key, the first candidate (in priority order) that also
/// defines it. Keys no candidate defines are left out.
pub fn compute_overrides(source: &DataMap, candidates: &[(String, DataMap)]) -> Overrides {
    source
        .keys()
        .filter_map(|key| {
            candidates.iter().find_map(|(file, map)| {
                map.get(key).map(|value| {
                    (
                        key.clone(),
                        OverrideEntry {
                            key: key.clone(),
                            defining_file: file.clone(),
                            value: value.clone(),
                        },
                    )
                })
            })
        })
        .collect()
}

enum LoadError {
    Storage(crate::storage::StorageError),
    Parse(String),
}

fn load_map(
    storage: &dyn StorageBackend,
    format: DataFormat,
    path: &Path,
) -> Result<DataMap, LoadError> {
    let bytes = storage.read(path).map_err(LoadError::Storage)?;
    let content = String::from_utf8(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;
    format.parse(&content).map_err(LoadError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalStorage, StorageError};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
:backends: [yaml, json]
:hierarchy: [teams, common, defaults]
:yaml:
  :datadir: hieradata
:json:
  :datadir: jsondata
"#;

    fn fixture(files: &[(&str, &str)]) -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hiera.yaml"), CONFIG).unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let storage = LocalStorage::new(dir.path().join("hiera.yaml"));
        (dir, storage)
    }

    fn priority_fixture() -> (TempDir, LocalStorage) {
        fixture(&[
            ("hieradata/teams.yaml", "a: T\n"),
            ("hieradata/common.yaml", "a: C\nb: C2\n"),
            ("hieradata/defaults.yaml", "a: D\nb: D2\nc: D3\n"),
        ])
    }

    #[test]
    fn test_priority_scenario() {
        let (_dir, storage) = priority_fixture();

        let overrides = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();

        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides["a"],
            OverrideEntry {
                key: "a".to_string(),
                defining_file: "teams.yaml".to_string(),
                value: json!("T"),
            }
        );
        assert_eq!(overrides["b"].defining_file, "common.yaml");
        assert_eq!(overrides["b"].value, json!("C2"));
        assert!(!overrides.contains_key("c"));
    }

    #[test]
    fn test_middle_level_only_sees_levels_above() {
        let (_dir, storage) = priority_fixture();

        let overrides = get_overrides(&storage, "yaml", "common.yaml").unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["a"].defining_file, "teams.yaml");
    }

    #[test]
    fn test_top_level_has_no_overrides() {
        let (_dir, storage) = priority_fixture();
        assert!(get_overrides(&storage, "yaml", "teams.yaml")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_idempotent_on_unchanged_inputs() {
        let (_dir, storage) = priority_fixture();
        let first = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();
        let second = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_keys_are_subset_of_source() {
        let (_dir, storage) = fixture(&[
            ("hieradata/teams.yaml", "a: T\nonly_teams: x\n"),
            ("hieradata/defaults.yaml", "a: D\n"),
        ]);
        let overrides = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();
        assert_eq!(overrides.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_missing_candidate_is_empty() {
        let (_dir, storage) = fixture(&[
            ("hieradata/common.yaml", "b: C2\n"),
            ("hieradata/defaults.yaml", "a: D\nb: D2\n"),
        ]);
        let overrides = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["b"].defining_file, "common.yaml");
    }

    #[test]
    fn test_missing_source_is_error() {
        let (_dir, storage) = fixture(&[("hieradata/teams.yaml", "a: T\n")]);
        let err = get_overrides(&storage, "yaml", "defaults.yaml").unwrap_err();
        assert!(matches!(
            err,
            OverrideError::Storage(StorageError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_source_parse_error() {
        let (_dir, storage) = fixture(&[("hieradata/defaults.yaml", "- not\n- a map\n")]);
        let err = get_overrides(&storage, "yaml", "defaults.yaml").unwrap_err();
        assert!(matches!(err, OverrideError::SourceParseError { .. }));
    }

    #[test]
    fn test_candidate_parse_error_fails_whole_call() {
        let (_dir, storage) = fixture(&[
            ("hieradata/teams.yaml", "a: [unclosed\n"),
            ("hieradata/common.yaml", "a: C\n"),
            ("hieradata/defaults.yaml", "a: D\n"),
        ]);
        let err = get_overrides(&storage, "yaml", "defaults.yaml").unwrap_err();
        assert!(matches!(err, OverrideError::CandidateParseError { .. }));
    }

    #[test]
    fn test_level_not_in_hierarchy() {
        let (_dir, storage) = fixture(&[("hieradata/nodes/web01.yaml", "a: 1\n")]);
        let err = get_overrides(&storage, "yaml", "nodes/web01.yaml").unwrap_err();
        assert!(matches!(err, OverrideError::Hierarchy(_)));
    }

    #[test]
    fn test_unknown_backend() {
        let (_dir, storage) = priority_fixture();
        let err = get_overrides(&storage, "gpg", "defaults.gpg").unwrap_err();
        assert!(matches!(
            err,
            OverrideError::Store(store::StoreError::UnknownBackend { .. })
        ));
    }

    #[test]
    fn test_json_backend_uses_json_files() {
        let (_dir, storage) = fixture(&[
            ("jsondata/teams.json", r#"{"port": 8080}"#),
            ("jsondata/defaults.json", r#"{"port": 80, "host": "x"}"#),
        ]);
        let overrides = get_overrides(&storage, "json", "defaults.json").unwrap();
        assert_eq!(overrides["port"].value, json!(8080));
        assert_eq!(overrides["port"].defining_file, "teams.json");
    }

    #[test]
    fn test_compute_overrides_short_circuits_per_key() {
        let source: DataMap = [("k".to_string(), json!("low"))].into_iter().collect();
        let high: DataMap = [("k".to_string(), json!("high"))].into_iter().collect();
        let mid: DataMap = [("k".to_string(), json!("mid"))].into_iter().collect();

        let overrides = compute_overrides(
            &source,
            &[("high.yaml".to_string(), high), ("mid.yaml".to_string(), mid)],
        );
        assert_eq!(overrides["k"].value, json!("high"));
        assert_eq!(overrides["k"].defining_file, "high.yaml");
    }

    #[test]
    fn test_merge_keys_do_not_show_as_overrides() {
        let (_dir, storage) = fixture(&[
            ("hieradata/teams.yaml", "team_base: &t\n  port: 8080\n<<: *t\n"),
            ("hieradata/defaults.yaml", "default_base: &d\n  port: 80\n<<: *d\n"),
        ]);

        let overrides = get_overrides(&storage, "yaml", "defaults.yaml").unwrap();

        assert!(!overrides.contains_key("<<"));
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["port"].value, json!(8080));
        assert_eq!(overrides["port"].defining_file, "teams.yaml");
    }
}
