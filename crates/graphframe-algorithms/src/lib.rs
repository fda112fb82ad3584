pub mod common;
pub mod pagerank;

pub use common::GraphView;
pub use pagerank::{page_rank, PageRankConfig, PageRankError, PageRankResult};
