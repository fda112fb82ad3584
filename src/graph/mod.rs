//! Dataframe-backed property graph
//!
//! A `GraphFrame` pairs a vertex frame (first column `id`) with an edge
//! frame (columns `src` and `dst`). Both are immutable after construction
//! and marked cached, since every query re-reads them:
//! - vertex filtering by attribute predicate (`filter`)
//! - triplet reconstruction by join or by motif (`triplets`, `motif`)
//! - degrees and PageRank (`crate::algo`)

pub mod error;
pub mod filter;
pub mod input;
pub mod motif;
pub mod triplets;

pub use error::{GraphFrameError, GraphResult, Stage};
pub use input::GraphInput;
pub use motif::{parse_motif, EdgeTerm, Motif};
pub use triplets::{JoinStrategy, PatternStrategy, Triplet, TripletKey, TripletStrategy};

use crate::frame::{DataFrame, DataType, Value};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, info_span};

/// Vertex identifier column
pub const ID: &str = "id";
/// Edge source column
pub const SRC: &str = "src";
/// Edge destination column
pub const DST: &str = "dst";

/// Immutable vertex/edge frame pair. Cloning shares the underlying frames.
#[derive(Debug, Clone)]
pub struct GraphFrame {
    vertices: Arc<DataFrame>,
    edges: Arc<DataFrame>,
}

impl GraphFrame {
    /// Wrap validated vertex and edge frames.
    ///
    /// Fails with a schema error when the vertex frame does not start with
    /// `id`, the edge frame lacks `src` or `dst`, or vertex ids are null or
    /// repeated. Edges pointing at unknown vertices are accepted.
    pub fn new(vertices: DataFrame, edges: DataFrame) -> GraphResult<Self> {
        let _span = info_span!("construction").entered();

        match vertices.schema().field(0) {
            Some((ID, _)) => {}
            Some((first, _)) => {
                return Err(GraphFrameError::schema(format!(
                    "vertex frame must start with an '{}' column, found '{}'",
                    ID, first
                )))
            }
            None => return Err(GraphFrameError::schema("vertex frame has no columns")),
        }
        for required in [SRC, DST] {
            if !edges.schema().contains(required) {
                return Err(GraphFrameError::schema(format!(
                    "edge frame is missing the '{}' column",
                    required
                )));
            }
        }

        let ids = vertices.column(ID).map_err(|e| e.at(Stage::Construction))?;
        let mut seen = FxHashSet::default();
        for id in ids.iter() {
            if id.is_null() {
                return Err(GraphFrameError::schema("vertex id must not be null"));
            }
            if !seen.insert(id.clone()) {
                return Err(GraphFrameError::schema(format!("duplicate vertex id {}", id)));
            }
        }

        let srcs = edges.column(SRC).map_err(|e| e.at(Stage::Construction))?;
        let dsts = edges.column(DST).map_err(|e| e.at(Stage::Construction))?;
        let dangling = srcs
            .iter()
            .zip(dsts.iter())
            .filter(|(s, d)| !seen.contains(s) || !seen.contains(d))
            .count();

        debug!(
            vertices = vertices.height(),
            edges = edges.height(),
            dangling,
            "graph constructed"
        );

        vertices.cache();
        edges.cache();

        Ok(Self {
            vertices: Arc::new(vertices),
            edges: Arc::new(edges),
        })
    }

    pub fn vertices(&self) -> &DataFrame {
        &self.vertices
    }

    pub fn edges(&self) -> &DataFrame {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.height()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.height()
    }

    /// Data type of the `id` column
    pub fn id_type(&self) -> DataType {
        self.vertices
            .schema()
            .field(0)
            .map(|(_, dtype)| dtype)
            .unwrap_or(DataType::Integer)
    }

    /// Names of the vertex attributes, `id` included
    pub fn vertex_columns(&self) -> Vec<&str> {
        self.vertices.column_names()
    }

    pub fn edge_columns(&self) -> Vec<&str> {
        self.edges.column_names()
    }
}

/// Build a graph of people from `(id, name, age)` and `(src, dst,
/// relationship)` tuples.
///
/// The id column takes the type of the first non-null vertex id, else of
/// the first non-null edge source (integer when there is neither). Rows
/// whose ids do not fit that type fail the build.
pub fn build_graph<K, N, V, E>(vertex_rows: V, edge_rows: E) -> GraphResult<GraphFrame>
where
    K: Into<Value>,
    N: Into<String>,
    V: IntoIterator<Item = (K, N, i64)>,
    E: IntoIterator<Item = (K, K, i64)>,
{
    let vertex_rows: Vec<Vec<Value>> = vertex_rows
        .into_iter()
        .map(|(id, name, age)| vec![id.into(), Value::String(name.into()), Value::Integer(age)])
        .collect();
    let edge_rows: Vec<Vec<Value>> = edge_rows
        .into_iter()
        .map(|(src, dst, weight)| vec![src.into(), dst.into(), Value::Integer(weight)])
        .collect();

    let id_type = vertex_rows
        .iter()
        .chain(&edge_rows)
        .find_map(|row| row[0].data_type())
        .unwrap_or(DataType::Integer);

    let vertices = DataFrame::from_rows(
        vec![(ID, id_type), ("name", DataType::String), ("age", DataType::Integer)],
        vertex_rows,
    )
    .map_err(|e| e.at(Stage::Construction))?;
    let edges = DataFrame::from_rows(
        vec![(SRC, id_type), (DST, id_type), ("relationship", DataType::Integer)],
        edge_rows,
    )
    .map_err(|e| e.at(Stage::Construction))?;

    GraphFrame::new(vertices, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::EngineError;

    fn vertex_frame(first: &str) -> DataFrame {
        DataFrame::from_rows(
            vec![(first, DataType::Integer), ("name", DataType::String)],
            vec![vec![1i64.into(), "Alice".into()], vec![2i64.into(), "Bob".into()]],
        )
        .unwrap()
    }

    fn edge_frame(src: &str, dst: &str) -> DataFrame {
        DataFrame::from_rows(
            vec![(src, DataType::Integer), (dst, DataType::Integer)],
            vec![vec![1i64.into(), 2i64.into()]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_marks_frames_cached() {
        let graph = GraphFrame::new(vertex_frame("id"), edge_frame("src", "dst")).unwrap();
        assert!(graph.vertices().is_cached());
        assert!(graph.edges().is_cached());
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_id_must_be_first_column() {
        let vertices = vertex_frame("id").select(&["name", "id"]).unwrap();
        let err = GraphFrame::new(vertices, edge_frame("src", "dst")).unwrap_err();
        assert!(err.is_schema_error());
        assert_eq!(err.stage(), Stage::Construction);

        let err = GraphFrame::new(vertex_frame("key"), edge_frame("src", "dst")).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_edges_need_src_and_dst() {
        let err = GraphFrame::new(vertex_frame("id"), edge_frame("from", "dst")).unwrap_err();
        assert!(err.is_schema_error());

        let err = GraphFrame::new(vertex_frame("id"), edge_frame("src", "to")).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_duplicate_ids_fail_fast() {
        let err = build_graph(vec![(1i64, "Alice", 28), (1i64, "Alicia", 29)], Vec::new()).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("duplicate vertex id 1"));
    }

    #[test]
    fn test_dangling_edges_are_tolerated() {
        let graph = build_graph(vec![(1i64, "Alice", 28)], vec![(1i64, 42i64, 3)]).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edges_without_vertices_keep_their_id_type() {
        let graph = build_graph(Vec::<(&str, &str, i64)>::new(), vec![("a", "b", 1)]).unwrap();
        assert_eq!(graph.id_type(), DataType::String);
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.triplets_by_join().unwrap().is_empty());
    }

    #[test]
    fn test_null_first_id_does_not_decide_the_type() {
        let err = build_graph(
            vec![(Value::Null, "Ghost", 1), (Value::from("b"), "Bob", 27)],
            Vec::new(),
        )
        .unwrap_err();
        // The column is typed from "b", so the null id is caught by validation
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_string_ids() {
        let graph = build_graph(vec![("a", "Alice", 28), ("b", "Bob", 27)], vec![("a", "b", 1)]).unwrap();
        assert_eq!(graph.id_type(), DataType::String);
    }

    #[test]
    fn test_mixed_id_types_are_an_engine_error() {
        let err = build_graph(
            vec![(Value::Integer(1), "Alice", 28), (Value::from("b"), "Bob", 27)],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GraphFrameError::Engine {
                stage: Stage::Construction,
                source: EngineError::TypeMismatch { .. }
            }
        ));
    }

    #[test]
    fn test_empty_graph() {
        let graph = build_graph(Vec::<(i64, &str, i64)>::new(), Vec::new()).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.id_type(), DataType::Integer);
    }
}
