//! Analysis configuration loaded from YAML
//!
//! ```yaml
//! pagerank:
//!   max_iterations: 3
//!   reset_probability: 0.15
//! filter:
//!   min_age: 40
//! ```
//!
//! Every field is optional and falls back to its default.

use crate::algo::PageRankConfig;
use crate::frame::Value;
use crate::graph::{GraphFrameError, GraphResult, Stage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// PageRank parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankSettings {
    /// Number of rounds to run
    pub max_iterations: usize,
    /// Teleport probability, in [0, 1]
    pub reset_probability: f64,
    /// Stop early once the L1 change of a round drops below this
    pub tolerance: Option<f64>,
    /// Personalise towards this vertex id
    pub source: Option<Value>,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            reset_probability: 0.15,
            tolerance: None,
            source: None,
        }
    }
}

impl PageRankSettings {
    pub fn to_config(&self) -> PageRankConfig<Value> {
        PageRankConfig {
            reset_probability: self.reset_probability,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
            source: self.source.clone(),
        }
    }
}

/// Vertex filter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Keep vertices strictly older than this
    pub min_age: i64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self { min_age: 40 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pagerank: PageRankSettings,
    pub filter: FilterSettings,
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> GraphResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| GraphFrameError::Io {
            stage: Stage::Config,
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}
