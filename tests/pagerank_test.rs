use graphframe::algo::{scores_frame, PageRankConfig, PageRankError};
use graphframe::frame::{EngineError, Value};
use graphframe::graph::{build_graph, GraphFrameError, GraphInput, Stage};

#[test]
fn test_pagerank_on_people() {
    let graph = GraphInput::people().build().unwrap();
    let result = graph.page_rank(3, 0.15).unwrap();

    assert_eq!(result.len(), 6);
    assert_eq!(result.iterations, 3);
    assert!((result.total_mass() - 1.0).abs() < 1e-9);
    assert!(result.sorted().iter().all(|(_, score)| *score > 0.0));

    // Ed has no incoming edges, so only teleportation reaches him
    let (lowest, _) = result.sorted().last().cloned().unwrap();
    assert_eq!(lowest, Value::Integer(5));
}

#[test]
fn test_pagerank_is_deterministic() {
    let graph = GraphInput::people().build().unwrap();
    let first = graph.page_rank(10, 0.15).unwrap();
    for _ in 0..5 {
        let again = graph.page_rank(10, 0.15).unwrap();
        assert_eq!(again.sorted(), first.sorted());
    }
}

#[test]
fn test_ranked_output_is_descending() {
    let graph = GraphInput::people().build().unwrap();
    let result = graph.page_rank(3, 0.15).unwrap();
    let frame = scores_frame(&result, graph.id_type()).unwrap();

    let scores: Vec<f64> = frame.column("pagerank").unwrap().iter().filter_map(|v| v.as_float()).collect();
    assert_eq!(scores.len(), 6);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_ranked_vertices_keep_attributes() {
    let graph = GraphInput::people().build().unwrap();
    let ranked = graph.ranked_vertices(&PageRankConfig::default()).unwrap();
    let rows = ranked.collect();

    assert_eq!(rows.len(), 6);
    assert_eq!(rows.last().unwrap().get("name"), Some(&Value::from("Ed")));
}

#[test]
fn test_mass_is_conserved_with_dangling_vertices() {
    // 1 -> 2 -> 3, vertex 3 has no out-edges
    let graph = build_graph(
        vec![(1i64, "A", 1), (2i64, "B", 1), (3i64, "C", 1)],
        vec![(1i64, 2i64, 1), (2i64, 3i64, 1)],
    )
    .unwrap();

    for iterations in [1, 5, 50] {
        let result = graph.page_rank(iterations, 0.15).unwrap();
        assert!((result.total_mass() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_personalised_pagerank() {
    let graph = GraphInput::people().build().unwrap();
    let config = PageRankConfig {
        max_iterations: 20,
        source: Some(Value::Integer(5)),
        ..Default::default()
    };
    let result = graph.page_rank_with(&config).unwrap();
    // All walks restart at Ed, so he goes from last place to first
    let (top, _) = result.sorted()[0].clone();
    assert_eq!(top, Value::Integer(5));
    assert!(result.get(&Value::Integer(5)).unwrap() >= 0.15);
    assert!((result.total_mass() - 1.0).abs() < 1e-9);
}

#[test]
fn test_tolerance_stops_early() {
    let graph = GraphInput::people().build().unwrap();
    let config = PageRankConfig {
        max_iterations: 500,
        tolerance: Some(1e-6),
        ..Default::default()
    };
    let result = graph.page_rank_with(&config).unwrap();
    assert!(result.iterations < 500);
}

#[test]
fn test_invalid_parameters() {
    let graph = GraphInput::people().build().unwrap();

    let err = graph.page_rank(0, 0.15).unwrap_err();
    assert!(matches!(
        err,
        GraphFrameError::Engine {
            stage: Stage::PageRank,
            source: EngineError::Algorithm(PageRankError::ZeroIterations)
        }
    ));

    for bad in [-0.5, 1.5, f64::NAN] {
        assert_eq!(graph.page_rank(3, bad).unwrap_err().stage(), Stage::PageRank);
    }

    let unknown = PageRankConfig {
        source: Some(Value::Integer(99)),
        ..Default::default()
    };
    assert!(graph.page_rank_with(&unknown).is_err());
}
