//! Graph algorithms module
//!
//! Algorithms are implemented in the `graphframe-algorithms` crate.
//! This module projects a `GraphFrame` onto their dense CSR view and turns
//! results back into frames.

pub mod degrees;
pub mod pagerank;

pub use graphframe_algorithms::{GraphView, PageRankConfig, PageRankError, PageRankResult};
pub use pagerank::scores_frame;

use crate::frame::{EngineResult, Value};
use crate::graph::{GraphFrame, DST, ID, SRC};
use tracing::debug;

/// Build a GraphView from the graph for algorithm execution.
///
/// Vertex order follows the vertex frame; edges with an unknown endpoint
/// are left out of the view.
pub fn build_view(graph: &GraphFrame) -> EngineResult<GraphView<Value>> {
    let ids = graph.vertices().column(ID)?;
    let srcs = graph.edges().column(SRC)?;
    let dsts = graph.edges().column(DST)?;

    let view = GraphView::from_edges(ids.iter(), srcs.iter().zip(dsts.iter()));
    debug!(
        nodes = view.node_count,
        edges = view.edge_count(),
        dangling = view.dangling_edges,
        "graph view built"
    );
    Ok(view)
}
