//! Vertex degrees

use super::build_view;
use crate::frame::{DataFrame, DataType, Value};
use crate::graph::{GraphFrame, GraphResult, Stage, ID};
use graphframe_algorithms::GraphView;
use tracing::info_span;

impl GraphFrame {
    /// `(id, inDegree)` for every vertex with at least one incoming edge
    pub fn in_degrees(&self) -> GraphResult<DataFrame> {
        self.degree_frame("inDegree", |view, idx| view.in_degree(idx))
    }

    /// `(id, outDegree)` for every vertex with at least one outgoing edge
    pub fn out_degrees(&self) -> GraphResult<DataFrame> {
        self.degree_frame("outDegree", |view, idx| view.out_degree(idx))
    }

    fn degree_frame<F>(&self, column: &str, degree: F) -> GraphResult<DataFrame>
    where
        F: Fn(&GraphView<Value>, usize) -> usize,
    {
        let _span = info_span!("degrees", column).entered();
        let view = build_view(self).map_err(|e| e.at(Stage::Degrees))?;

        let rows = (0..view.node_count).filter_map(|idx| match degree(&view, idx) {
            0 => None,
            d => Some(vec![view.index_to_node[idx].clone(), Value::Integer(d as i64)]),
        });

        DataFrame::from_rows(vec![(ID, self.id_type()), (column, DataType::Integer)], rows)
            .map_err(|e| e.at(Stage::Degrees))
    }
}
