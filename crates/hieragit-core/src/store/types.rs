//! Hiera config model.
//!
//! The on-disk form uses colon-sigil keys:
//!
//! ```yaml
//! :backends:
//!   - yaml
//!   - gpg
//! :hierarchy:
//!   - teams
//!   - common
//!   - defaults
//! :yaml:
//!   :datadir: /etc/puppetlabs/code/hieradata
//! :gpg:
//!   :datadir: /etc/puppetlabs/code/hieradata
//!   :key_dir: /etc/puppetlabs/gpg
//! ```
//!
//! Keys this model does not interpret are kept so that a load/save round
//! trip does not drop them.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::errors::StoreError;

const BACKENDS_KEY: &str = ":backends";
const HIERARCHY_KEY: &str = ":hierarchy";
const DATADIR_KEY: &str = ":datadir";

/// Options for one backend, from its `:<backend>:` section.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendOptions {
    pub datadir: PathBuf,
    /// Other keys in the section, e.g. `:key_dir:`.
    pub extra: Mapping,
}

impl BackendOptions {
    pub fn new(datadir: impl Into<PathBuf>) -> Self {
        Self {
            datadir: datadir.into(),
            extra: Mapping::new(),
        }
    }

    /// `datadir`, resolved against `base` when relative.
    pub fn resolved_datadir(&self, base: &Path) -> PathBuf {
        if self.datadir.is_absolute() {
            self.datadir.clone()
        } else {
            base.join(&self.datadir)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HieraConfig {
    /// Highest priority first.
    pub hierarchy: Vec<String>,
    pub backends: Vec<String>,
    pub backend_config: BTreeMap<String, BackendOptions>,
    /// Top-level keys that are neither backends, hierarchy nor a backend section.
    pub extra: Mapping,
}

impl HieraConfig {
    pub fn new(hierarchy: Vec<String>, backends: Vec<String>) -> Self {
        Self {
            hierarchy,
            backends,
            backend_config: BTreeMap::new(),
            extra: Mapping::new(),
        }
    }

    pub fn with_backend(mut self, name: &str, options: BackendOptions) -> Self {
        self.backend_config.insert(name.to_string(), options);
        self
    }

    /// Parse the YAML text of a Hiera config. `path` is only used in errors.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, StoreError> {
        let parse_err = |message: String| StoreError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        let root: Value = serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
        let Value::Mapping(mut root) = root else {
            return Err(parse_err("top level is not a mapping".to_string()));
        };

        let backends = take_list(&mut root, BACKENDS_KEY).map_err(parse_err)?;
        let hierarchy = take_list(&mut root, HIERARCHY_KEY).map_err(parse_err)?;

        let mut backend_config = BTreeMap::new();
        for backend in &backends {
            let key = Value::String(format!(":{backend}"));
            let Some(section) = root.remove(&key) else {
                continue;
            };
            let options = parse_backend_options(backend, section).map_err(parse_err)?;
            backend_config.insert(backend.clone(), options);
        }

        let config = Self {
            hierarchy,
            backends,
            backend_config,
            extra: root,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to the colon-sigil YAML form.
    pub fn to_yaml(&self) -> Result<String, StoreError> {
        let mut root = Mapping::new();
        root.insert(
            Value::String(BACKENDS_KEY.to_string()),
            string_list(&self.backends),
        );
        root.insert(
            Value::String(HIERARCHY_KEY.to_string()),
            string_list(&self.hierarchy),
        );

        for (name, options) in &self.backend_config {
            let mut section = Mapping::new();
            section.insert(
                Value::String(DATADIR_KEY.to_string()),
                Value::String(options.datadir.display().to_string()),
            );
            for (k, v) in &options.extra {
                section.insert(k.clone(), v.clone());
            }
            root.insert(Value::String(format!(":{name}")), Value::Mapping(section));
        }

        for (k, v) in &self.extra {
            root.insert(k.clone(), v.clone());
        }

        serde_yaml::to_string(&Value::Mapping(root)).map_err(|e| StoreError::WriteError {
            message: format!("Failed to serialize Hiera config: {}", e),
            source: None,
        })
    }

    /// Check the config invariants: a non-empty hierarchy, and a section
    /// with a datadir for every listed backend.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.hierarchy.is_empty() {
            return Err(StoreError::InvalidConfiguration {
                message: "hierarchy must list at least one level".to_string(),
            });
        }

        for backend in &self.backends {
            match self.backend_config.get(backend) {
                Some(options) if !options.datadir.as_os_str().is_empty() => {}
                Some(_) => {
                    return Err(StoreError::InvalidConfiguration {
                        message: format!("backend '{backend}' has an empty :datadir:"),
                    });
                }
                None => {
                    return Err(StoreError::InvalidConfiguration {
                        message: format!("backend '{backend}' has no :{backend}: section"),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Remove `key` and read it as a list of strings. A bare string counts as
/// a one-element list.
fn take_list(root: &mut Mapping, key: &str) -> Result<Vec<String>, String> {
    let value = root
        .remove(Value::String(key.to_string()))
        .ok_or_else(|| format!("missing '{key}:'"))?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(format!("'{key}:' entries must be strings, got {other:?}")),
            })
            .collect(),
        other => Err(format!("'{key}:' must be a string or a list, got {other:?}")),
    }
}

fn parse_backend_options(backend: &str, section: Value) -> Result<BackendOptions, String> {
    let Value::Mapping(mut section) = section else {
        return Err(format!("':{backend}:' must be a mapping"));
    };

    let datadir = match section.remove(Value::String(DATADIR_KEY.to_string())) {
        Some(Value::String(dir)) => PathBuf::from(dir),
        Some(other) => {
            return Err(format!(
                "':{backend}: :datadir:' must be a string, got {other:?}"
            ));
        }
        None => PathBuf::new(),
    };

    Ok(BackendOptions {
        datadir,
        extra: section,
    })
}

fn string_list(items: &[String]) -> Value {
    Value::Sequence(items.iter().cloned().map(Value::String).collect())
}
