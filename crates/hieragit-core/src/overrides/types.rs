use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A source key shadowed by a higher-priority file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideEntry {
    pub key: String,
    /// Data file name (e.g. `teams.yaml`) that wins for this key.
    pub defining_file: String,
    pub value: Value,
}

/// Shadowed keys of one file, keyed by key name.
pub type Overrides = BTreeMap<String, OverrideEntry>;
