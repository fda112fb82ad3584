//! PageRank over a GraphFrame
//!
//! Scores are recomputed on every call and never stored on the graph.

use super::build_view;
use crate::frame::{DataFrame, DataType, EngineError, EngineResult, Value};
use crate::graph::{GraphFrame, GraphResult, Stage, ID};
use graphframe_algorithms::{page_rank, PageRankConfig, PageRankResult};
use tracing::{debug, info_span};

/// Score column produced by PageRank
pub const PAGERANK: &str = "pagerank";
const RANK_KEY: &str = "__rank_id";

impl GraphFrame {
    /// PageRank with a fixed number of rounds and uniform teleportation
    pub fn page_rank(&self, max_iterations: usize, reset_probability: f64) -> GraphResult<PageRankResult<Value>> {
        self.page_rank_with(&PageRankConfig {
            reset_probability,
            max_iterations,
            ..Default::default()
        })
    }

    /// PageRank with full control over tolerance and personalisation
    pub fn page_rank_with(&self, config: &PageRankConfig<Value>) -> GraphResult<PageRankResult<Value>> {
        let _span = info_span!(
            "pagerank",
            max_iterations = config.max_iterations,
            reset_probability = config.reset_probability
        )
        .entered();

        let view = build_view(self).map_err(|e| e.at(Stage::PageRank))?;
        let result = page_rank(&view, config).map_err(|e| EngineError::from(e).at(Stage::PageRank))?;

        debug!(
            iterations = result.iterations,
            mass = result.total_mass(),
            "pagerank finished"
        );
        Ok(result)
    }

    /// All vertex attributes plus a `pagerank` column, highest score first
    pub fn ranked_vertices(&self, config: &PageRankConfig<Value>) -> GraphResult<DataFrame> {
        let result = self.page_rank_with(config)?;
        self.attach_scores(&result).map_err(|e| e.at(Stage::PageRank))
    }

    fn attach_scores(&self, result: &PageRankResult<Value>) -> EngineResult<DataFrame> {
        let scores = scores_frame(result, self.id_type())?.rename(ID, RANK_KEY)?;
        let joined = scores.join(self.vertices(), RANK_KEY, ID)?;

        let mut columns = self.vertex_columns();
        columns.push(PAGERANK);
        // Stable: ties keep the ascending-id order of the score frame
        joined.select(&columns)?.sort_by(PAGERANK, true)
    }
}

/// `(id, pagerank)` ordered by descending score, ties by ascending id
pub fn scores_frame(result: &PageRankResult<Value>, id_type: DataType) -> EngineResult<DataFrame> {
    let rows = result
        .sorted()
        .into_iter()
        .map(|(id, score)| vec![id, Value::Float(score)]);
    DataFrame::from_rows(vec![(ID, id_type), (PAGERANK, DataType::Float)], rows)
}
