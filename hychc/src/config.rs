//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//! ```
//! use hychc::config::{ChcConfig, EntryPolicy};
//!
//! let conf = ChcConfig::from_toml_str("[graph]\nentry_policy = \"first_defined\"\n").unwrap();
//! assert_eq!(conf.graph.entry_policy, EntryPolicy::FirstDefined);
//! assert_eq!(ChcConfig::from_toml_str("").unwrap(), ChcConfig::default());
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ChcError, ChcResult};

/// How [`crate::graph::DependencyGraph`] picks the entry relation among its candidates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryPolicy {
    /// Set the entry only when exactly one candidate exists.
    #[default]
    Unique,
    /// Pick the candidate defined by the earliest fact clause.
    FirstDefined,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub entry_policy: EntryPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChcConfig {
    pub graph: GraphConfig,
}

impl ChcConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(toml_str: &str) -> ChcResult<Self> {
        toml::from_str(toml_str).map_err(|source| ChcError::ConfigParse {
            source,
            file: "<inline>".to_string(),
        })
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> ChcResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|source| ChcError::ConfigParse {
            source,
            file: path.display().to_string(),
        })
    }
}
