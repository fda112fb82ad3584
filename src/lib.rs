//! GraphFrame
//!
//! A property graph represented as two dataframes: a vertex frame keyed by
//! `id` and an edge frame keyed by `src`/`dst`. Graph queries are expressed
//! as relational operations on those frames.
//!
//! # Modules
//!
//! - `frame`: the in-process columnar engine (schema, columns, joins)
//! - `graph`: construction, vertex filtering, triplets and motif search
//! - `algo`: degrees and PageRank over a CSR projection of the graph
//! - `config`: YAML analysis settings
//!
//! ## Example Usage
//!
//! ```rust
//! use graphframe::graph::{build_graph, JoinStrategy, PatternStrategy};
//!
//! let graph = build_graph(
//!     vec![(1i64, "Alice", 28), (2i64, "Bob", 27)],
//!     vec![(2i64, 1i64, 7)],
//! )
//! .unwrap();
//!
//! let older = graph.filter_vertices(|age| age > 27).unwrap();
//! assert_eq!(older, vec![("Alice".to_string(), 28)]);
//!
//! let by_join = graph.triplets(&JoinStrategy).unwrap();
//! let by_pattern = graph.triplets(&PatternStrategy).unwrap();
//! assert_eq!(by_join, by_pattern);
//!
//! let ranks = graph.page_rank(3, 0.15).unwrap();
//! assert!((ranks.total_mass() - 1.0).abs() < 1e-9);
//! ```

pub mod algo;
pub mod config;
pub mod frame;
pub mod graph;

pub use algo::{PageRankConfig, PageRankError, PageRankResult};
pub use config::AnalysisConfig;
pub use frame::{DataFrame, DataType, EngineError, Value};
pub use graph::{
    build_graph, GraphFrame, GraphFrameError, GraphInput, GraphResult, JoinStrategy, PatternStrategy,
    Stage, Triplet, TripletStrategy,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
