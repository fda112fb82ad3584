//! Raw tuple input for graph construction

use super::error::{GraphFrameError, GraphResult, Stage};
use super::{build_graph, GraphFrame};
use crate::frame::Value;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Vertex and edge tuples as read from a JSON document:
///
/// ```json
/// { "vertices": [[1, "Alice", 28]], "edges": [[2, 1, 7]] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphInput {
    /// `(id, name, age)`
    pub vertices: Vec<(Value, String, i64)>,
    /// `(src, dst, relationship)`
    pub edges: Vec<(Value, Value, i64)>,
}

impl GraphInput {
    /// The six-person social graph used by the demo and the CLI default
    pub fn people() -> Self {
        let vertices = [
            (1, "Alice", 28),
            (2, "Bob", 27),
            (3, "Charlie", 65),
            (4, "David", 42),
            (5, "Ed", 55),
            (6, "Fran", 50),
        ];
        let edges = [
            (2, 1, 7),
            (2, 4, 2),
            (3, 2, 4),
            (3, 6, 3),
            (4, 1, 1),
            (5, 2, 2),
            (5, 3, 8),
            (5, 6, 3),
        ];

        Self {
            vertices: vertices
                .iter()
                .map(|&(id, name, age)| (Value::Integer(id), name.to_string(), age))
                .collect(),
            edges: edges
                .iter()
                .map(|&(src, dst, weight)| (Value::Integer(src), Value::Integer(dst), weight))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GraphFrameError::Io {
            stage: Stage::Construction,
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn build(self) -> GraphResult<GraphFrame> {
        build_graph(self.vertices, self.edges)
    }
}
