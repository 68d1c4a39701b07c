use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{ENV_STRIP_SUFFIX, ENV_SUFFIX_MARKER};

/// Query pre-processing configuration.
///
/// When `strip_suffix` is on and a `suffix_marker` is set, search queries are
/// cut at the first occurrence of the marker before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub strip_suffix: bool,
    pub suffix_marker: Option<String>,
}

impl QueryConfig {
    /// Read the suffix convention from the process environment.
    ///
    /// `use_re2=True` enables stripping; the marker is `re2_prompt`
    /// preceded by a newline. Call this once when building a config; the
    /// query path never reads the environment itself.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_STRIP_SUFFIX).ok().as_deref(),
            std::env::var(ENV_SUFFIX_MARKER).ok().as_deref(),
        )
    }

    fn from_vars(flag: Option<&str>, marker: Option<&str>) -> Self {
        Self {
            strip_suffix: flag == Some("True"),
            suffix_marker: marker.map(|m| format!("\n{m}")),
        }
    }

    /// The marker to cut at, if stripping is active.
    pub fn active_marker(&self) -> Option<&str> {
        if !self.strip_suffix {
            return None;
        }
        self.suffix_marker.as_deref().filter(|m| !m.is_empty())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            strip_suffix: defaults::DEFAULT_STRIP_SUFFIX,
            suffix_marker: None,
        }
    }
}
