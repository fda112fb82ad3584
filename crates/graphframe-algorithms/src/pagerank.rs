//! PageRank algorithm implementation
//!
//! Synchronous rounds over a CSR view: every vertex pulls
//! `(1 - reset) * score / out_degree` from each predecessor, then receives
//! its share of the teleport mass. Vertices without out-edges hand their
//! non-reset mass to the teleport pool, so total mass stays at 1.0.

use super::common::GraphView;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig<K> {
    /// Probability of teleporting instead of following an edge (usually 0.15)
    pub reset_probability: f64,
    /// Number of iterations
    pub max_iterations: usize,
    /// Stop early once the L1 change of a round drops below this value.
    /// `None` runs exactly `max_iterations` rounds.
    pub tolerance: Option<f64>,
    /// Personalised PageRank: teleport only to this vertex
    pub source: Option<K>,
}

impl<K> Default for PageRankConfig<K> {
    fn default() -> Self {
        Self {
            reset_probability: 0.15,
            max_iterations: 20,
            tolerance: None,
            source: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageRankError {
    #[error("reset probability must be within [0, 1], got {0}")]
    InvalidResetProbability(f64),

    #[error("max_iterations must be positive")]
    ZeroIterations,

    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("personalisation source is not a vertex of the graph")]
    UnknownSource,
}

/// Vertex scores produced by [`page_rank`]
#[derive(Debug, Clone)]
pub struct PageRankResult<K> {
    /// Vertex key -> score
    pub scores: HashMap<K, f64>,
    /// Rounds actually executed
    pub iterations: usize,
}

impl<K: Eq + Hash> PartialEq for PageRankResult<K> {
    fn eq(&self, other: &Self) -> bool {
        self.iterations == other.iterations && self.scores == other.scores
    }
}

impl<K: Clone + Eq + Hash + Ord> PageRankResult<K> {
    /// Scores ordered by descending score, ties broken by ascending key
    pub fn sorted(&self) -> Vec<(K, f64)> {
        let mut ranked: Vec<(K, f64)> = self.scores.iter().map(|(k, s)| (k.clone(), *s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

impl<K> PageRankResult<K> {
    pub fn get(&self, key: &K) -> Option<f64>
    where
        K: Eq + Hash,
    {
        self.scores.get(key).copied()
    }

    /// Sum of all vertex scores
    pub fn total_mass(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank<K>(
    view: &GraphView<K>,
    config: &PageRankConfig<K>,
) -> Result<PageRankResult<K>, PageRankError>
where
    K: Clone + Eq + Hash + Send + Sync,
{
    let r = config.reset_probability;
    if !r.is_finite() || !(0.0..=1.0).contains(&r) {
        return Err(PageRankError::InvalidResetProbability(r));
    }
    if config.max_iterations == 0 {
        return Err(PageRankError::ZeroIterations);
    }
    if let Some(tol) = config.tolerance {
        if !tol.is_finite() || tol < 0.0 {
            return Err(PageRankError::InvalidTolerance(tol));
        }
    }

    let n = view.node_count;
    if n == 0 {
        return Ok(PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
        });
    }

    let source = match &config.source {
        Some(key) => Some(view.index_of(key).ok_or(PageRankError::UnknownSource)?),
        None => None,
    };

    let inv_n = 1.0 / n as f64;
    let mut scores = vec![inv_n; n];
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        // Dangling mass is summed sequentially so rounds are bit-reproducible
        let dangling: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();
        let teleport = r + (1.0 - r) * dangling;

        let next: Vec<f64> = (0..n)
            .into_par_iter()
            .map(|i| {
                let incoming: f64 = view
                    .predecessors(i)
                    .iter()
                    .map(|&j| (1.0 - r) * scores[j] / view.out_degree(j) as f64)
                    .sum();
                let share = match source {
                    Some(s) if s == i => teleport,
                    Some(_) => 0.0,
                    None => teleport * inv_n,
                };
                share + incoming
            })
            .collect();

        let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;
        iterations += 1;

        if let Some(tol) = config.tolerance {
            if delta < tol {
                break;
            }
        }
    }

    let scores = scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| (view.index_to_node[idx].clone(), score))
        .collect();

    Ok(PageRankResult { scores, iterations })
}
