//! Errors surfaced by graph operations
//!
//! Every error carries the stage it came from so a failure can be traced to
//! construction, filtering, one of the triplet strategies, or PageRank.

use crate::frame::EngineError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Construction,
    Filter,
    Join,
    Pattern,
    Degrees,
    PageRank,
    Config,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Construction => "construction",
            Stage::Filter => "filter",
            Stage::Join => "join",
            Stage::Pattern => "pattern",
            Stage::Degrees => "degrees",
            Stage::PageRank => "pagerank",
            Stage::Config => "config",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum GraphFrameError {
    /// Required columns or identifiers are missing or invalid
    #[error("[{stage}] schema error: {message}")]
    Schema { stage: Stage, message: String },

    /// The execution engine failed
    #[error("[{stage}] engine error: {source}")]
    Engine {
        stage: Stage,
        #[source]
        source: EngineError,
    },

    #[error("[{stage}] failed to read {}: {source}", path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[config] invalid YAML: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("[construction] invalid graph input: {0}")]
    InputJson(#[from] serde_json::Error),
}

impl GraphFrameError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        GraphFrameError::Schema {
            stage: Stage::Construction,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            GraphFrameError::Schema { stage, .. }
            | GraphFrameError::Engine { stage, .. }
            | GraphFrameError::Io { stage, .. } => *stage,
            GraphFrameError::ConfigYaml(_) => Stage::Config,
            GraphFrameError::InputJson(_) => Stage::Construction,
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, GraphFrameError::Schema { .. })
    }
}

impl EngineError {
    /// Attach the stage an engine failure happened in
    pub fn at(self, stage: Stage) -> GraphFrameError {
        GraphFrameError::Engine { stage, source: self }
    }
}

pub type GraphResult<T> = Result<T, GraphFrameError>;
