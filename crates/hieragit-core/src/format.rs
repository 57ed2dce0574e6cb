//! Hieradata payload formats.
//!
//! The format follows the backend name: `json` files are JSON, every other
//! backend (`yaml`, `eyaml`, custom ones) is read as YAML.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flat key/value content of one data file.
pub type DataMap = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    pub fn for_backend(backend: &str) -> Self {
        if backend.eq_ignore_ascii_case("json") {
            DataFormat::Json
        } else {
            DataFormat::Yaml
        }
    }

    /// Parse a data file. Empty content is an empty map; a root that is not
    /// a mapping is an error. YAML merge keys (`<<: *anchor`) are expanded.
    pub fn parse(&self, content: &str) -> Result<DataMap, String> {
        if content.trim().is_empty() {
            return Ok(DataMap::new());
        }

        let value: Value = match self {
            DataFormat::Yaml => {
                let mut yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| e.to_string())?;
                yaml.apply_merge().map_err(|e| e.to_string())?;
                serde_yaml::from_value(yaml).map_err(|e| e.to_string())?
            }
            DataFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        };

        match value {
            Value::Null => Ok(DataMap::new()),
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(format!("expected a key/value mapping, got {}", kind_of(&other))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
