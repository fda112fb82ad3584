//! Triplet reconstruction: (source vertex, edge, destination vertex)
//!
//! Two interchangeable strategies produce the same logical triplets:
//! - `JoinStrategy`: edges inner-joined with vertices on `src`, then on `dst`
//! - `PatternStrategy`: the `(a)-[e]->(b)` motif
//!
//! Edges whose endpoints are not both known vertices never appear.

use super::error::{GraphResult, Stage};
use super::{GraphFrame, DST, ID, SRC};
use crate::frame::{DataFrame, EngineResult, Row, Value};
use indexmap::IndexMap;
use tracing::{debug, info_span};

/// Attribute name -> value, in schema order
pub type Attributes = IndexMap<String, Value>;

/// `(source name, relationship, destination name)`
pub type TripletKey = (Value, Value, Value);

const SRC_SUFFIX: &str = "_src";
const DST_SUFFIX: &str = "_dst";
const TRIPLET_MOTIF: &str = "(a)-[e]->(b)";

/// One edge together with both endpoint vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triplet {
    pub src: Attributes,
    pub edge: Attributes,
    pub dst: Attributes,
}

impl Triplet {
    /// Strategy-independent identity of the triplet
    pub fn key(&self) -> TripletKey {
        let get = |attrs: &Attributes, name: &str| attrs.get(name).cloned().unwrap_or(Value::Null);
        (
            get(&self.src, "name"),
            get(&self.edge, "relationship"),
            get(&self.dst, "name"),
        )
    }
}

/// A way of reconstructing triplets from a graph
pub trait TripletStrategy {
    fn name(&self) -> &'static str;

    fn reconstruct(&self, graph: &GraphFrame) -> GraphResult<Vec<Triplet>>;
}

/// Two-stage inner join of edges against vertices
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinStrategy;

/// Declarative `(a)-[e]->(b)` motif
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternStrategy;

impl TripletStrategy for JoinStrategy {
    fn name(&self) -> &'static str {
        "join"
    }

    fn reconstruct(&self, graph: &GraphFrame) -> GraphResult<Vec<Triplet>> {
        let joined = graph.join_endpoints().map_err(|e| e.at(Stage::Join))?;
        let vertex_columns = graph.vertex_columns();
        let edge_columns = graph.edge_columns();

        Ok(joined
            .collect()
            .iter()
            .map(|row| Triplet {
                src: attributes(row, &vertex_columns, |c| format!("{}{}", c, SRC_SUFFIX)),
                edge: attributes(row, &edge_columns, str::to_string),
                dst: attributes(row, &vertex_columns, |c| format!("{}{}", c, DST_SUFFIX)),
            })
            .collect())
    }
}

impl TripletStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn reconstruct(&self, graph: &GraphFrame) -> GraphResult<Vec<Triplet>> {
        let matches = graph.find(TRIPLET_MOTIF)?;
        let vertex_columns = graph.vertex_columns();
        let edge_columns = graph.edge_columns();

        Ok(matches
            .collect()
            .iter()
            .map(|row| Triplet {
                src: attributes(row, &vertex_columns, |c| format!("a.{}", c)),
                edge: attributes(row, &edge_columns, |c| format!("e.{}", c)),
                dst: attributes(row, &vertex_columns, |c| format!("b.{}", c)),
            })
            .collect())
    }
}

fn attributes<F>(row: &Row, columns: &[&str], qualify: F) -> Attributes
where
    F: Fn(&str) -> String,
{
    columns
        .iter()
        .map(|&column| {
            let value = row.get(&qualify(column)).cloned().unwrap_or(Value::Null);
            (column.to_string(), value)
        })
        .collect()
}

impl GraphFrame {
    /// Edges with suffixed source (`*_src`) and destination (`*_dst`) vertex
    /// attributes attached
    fn join_endpoints(&self) -> EngineResult<DataFrame> {
        let src = self.vertices().with_suffix(SRC_SUFFIX)?;
        let dst = self.vertices().with_suffix(DST_SUFFIX)?;

        let with_src = self
            .edges()
            .join(&src, SRC, &format!("{}{}", ID, SRC_SUFFIX))?;
        debug!(rows = with_src.height(), "edges joined with source vertices");

        let with_dst = with_src.join(&dst, DST, &format!("{}{}", ID, DST_SUFFIX))?;
        debug!(rows = with_dst.height(), "edges joined with destination vertices");
        Ok(with_dst)
    }

    /// `(name_src, age_src, relationship, name_dst, age_dst)` per edge with
    /// both endpoints present
    pub fn triplets_by_join(&self) -> GraphResult<DataFrame> {
        let _span = info_span!("join").entered();
        self.join_endpoints()
            .and_then(|joined| {
                joined.select(&["name_src", "age_src", "relationship", "name_dst", "age_dst"])
            })
            .map_err(|e| e.at(Stage::Join))
    }

    /// `(src_name, dst_name, likes)` per edge with both endpoints present
    pub fn triplets_by_pattern(&self) -> GraphResult<DataFrame> {
        self.find(TRIPLET_MOTIF)?
            .select_as(&[("a.name", "src_name"), ("b.name", "dst_name"), ("e.relationship", "likes")])
            .map_err(|e| e.at(Stage::Pattern))
    }

    /// Triplets through any strategy
    pub fn triplets(&self, strategy: &dyn TripletStrategy) -> GraphResult<Vec<Triplet>> {
        let triplets = strategy.reconstruct(self)?;
        debug!(strategy = strategy.name(), count = triplets.len(), "triplets reconstructed");
        Ok(triplets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, GraphInput};

    fn sorted_keys(graph: &GraphFrame, strategy: &dyn TripletStrategy) -> Vec<TripletKey> {
        let mut keys: Vec<TripletKey> = graph.triplets(strategy).unwrap().iter().map(Triplet::key).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_join_columns() {
        let graph = GraphInput::people().build().unwrap();
        let triplets = graph.triplets_by_join().unwrap();
        assert_eq!(
            triplets.column_names(),
            vec!["name_src", "age_src", "relationship", "name_dst", "age_dst"]
        );
        assert_eq!(triplets.height(), 8);
    }

    #[test]
    fn test_pattern_columns() {
        let graph = GraphInput::people().build().unwrap();
        let triplets = graph.triplets_by_pattern().unwrap();
        assert_eq!(triplets.column_names(), vec!["src_name", "dst_name", "likes"]);
        assert_eq!(triplets.height(), 8);
    }

    #[test]
    fn test_bob_likes_alice() {
        let graph = GraphInput::people().build().unwrap();
        let bob_alice: TripletKey = ("Bob".into(), 7i64.into(), "Alice".into());
        for strategy in [&JoinStrategy as &dyn TripletStrategy, &PatternStrategy] {
            assert!(sorted_keys(&graph, strategy).contains(&bob_alice), "{}", strategy.name());
        }
    }

    #[test]
    fn test_strategies_agree_with_dangling_and_parallel_edges() {
        let graph = build_graph(
            vec![(1i64, "A", 10), (2i64, "B", 20), (3i64, "C", 30)],
            vec![(1i64, 2i64, 1), (1i64, 2i64, 1), (2i64, 2i64, 4), (3i64, 99i64, 5), (77i64, 1i64, 6)],
        )
        .unwrap();

        let by_join = sorted_keys(&graph, &JoinStrategy);
        let by_pattern = sorted_keys(&graph, &PatternStrategy);
        assert_eq!(by_join, by_pattern);
        assert_eq!(by_join.len(), 3);
    }

    #[test]
    fn test_triplet_attributes() {
        let graph = build_graph(vec![(1i64, "A", 10), (2i64, "B", 20)], vec![(1i64, 2i64, 9)]).unwrap();
        let triplet = &graph.triplets(&JoinStrategy).unwrap()[0];

        assert_eq!(triplet.src.get("id"), Some(&Value::Integer(1)));
        assert_eq!(triplet.src.get("age"), Some(&Value::Integer(10)));
        assert_eq!(triplet.edge.get("dst"), Some(&Value::Integer(2)));
        assert_eq!(triplet.dst.get("name"), Some(&Value::from("B")));
        assert_eq!(graph.triplets(&PatternStrategy).unwrap()[0], *triplet);
    }

    #[test]
    fn test_missing_relationship_column_reports_join_stage() {
        let vertices = GraphInput::people().build().unwrap().vertices().clone();
        let edges = DataFrame::from_rows(
            vec![(SRC, crate::frame::DataType::Integer), (DST, crate::frame::DataType::Integer)],
            vec![vec![1i64.into(), 2i64.into()]],
        )
        .unwrap();
        let graph = GraphFrame::new(vertices, edges).unwrap();

        assert_eq!(graph.triplets_by_join().unwrap_err().stage(), Stage::Join);
        assert_eq!(graph.triplets_by_pattern().unwrap_err().stage(), Stage::Pattern);
    }
}
