use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options fixed when a [`BitmaskSet`](crate::BitmaskSet) is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetOptions {
    /// Sort the universe once at construction. This only changes which bit
    /// stands for which element, which can make bit strings easier to read.
    pub sort: bool,
}

/// Options applied when a bitmask is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BitmaskOptions {
    pub sort: bool,

    /// Also honor the owning set's `sort` option
    pub inherit_sort: bool,
}

impl Default for BitmaskOptions {
    fn default() -> Self {
        Self {
            sort: false,
            inherit_sort: true,
        }
    }
}

impl BitmaskOptions {
    /// The effective sort flag for a bitmask of a set built with `set`.
    pub fn resolve(&self, set: &SetOptions) -> bool {
        if self.inherit_sort {
            set.sort || self.sort
        } else {
            self.sort
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Options for the universe
    pub set: SetOptions,

    /// Defaults for every bitmask built through the set's factory
    pub bitmask: BitmaskOptions,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded bitmask config");
        Ok(config)
    }
}
