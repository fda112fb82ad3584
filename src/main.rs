use graphframe::algo::scores_frame;
use graphframe::{AnalysisConfig, GraphFrame, GraphInput, GraphResult};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("GraphFrame v{}", graphframe::version());
    println!("==========================================");
    println!();

    if let Err(e) = run().await {
        error!("demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::var("GRAPHFRAME_CONFIG") {
        Ok(path) => AnalysisConfig::load(path)?,
        Err(_) => AnalysisConfig::default(),
    };
    let graph = Arc::new(GraphInput::people().build()?);
    info!(vertices = graph.vertex_count(), edges = graph.edge_count(), "graph ready");

    println!("Vertices:\n{}", graph.vertices());
    println!("Edges:\n{}", graph.edges());

    // Queries share the immutable graph and run side by side
    let min_age = config.filter.min_age;
    let filter = spawn(&graph, move |g| {
        g.filter_vertices_by("age", |age| age.as_integer().map_or(false, |a| a > min_age))
    });
    let by_join = spawn(&graph, |g| g.triplets_by_join());
    let by_pattern = spawn(&graph, |g| g.triplets_by_pattern());
    let pagerank_config = config.pagerank.to_config();
    let ranks = spawn(&graph, move |g| {
        let result = g.page_rank_with(&pagerank_config)?;
        scores_frame(&result, g.id_type()).map_err(|e| e.at(graphframe::Stage::PageRank))
    });

    println!("=== Vertices older than {} ===\n{}", min_age, filter.await??);
    println!("=== Triplets (join) ===\n{}", by_join.await??);
    println!("=== Triplets (pattern) ===\n{}", by_pattern.await??);
    println!("=== PageRank ===\n{}", ranks.await??);
    Ok(())
}

fn spawn<T, F>(graph: &Arc<GraphFrame>, query: F) -> tokio::task::JoinHandle<GraphResult<T>>
where
    T: Send + 'static,
    F: FnOnce(&GraphFrame) -> GraphResult<T> + Send + 'static,
{
    let graph = Arc::clone(graph);
    tokio::task::spawn_blocking(move || query(&graph))
}
