//! PageRank estimation
//!
//! This module provides two independent estimators of the stationary
//! importance distribution over a link graph: Monte Carlo random-walk
//! sampling and deterministic power iteration.

pub mod iteration;
pub mod sampling;
pub mod transition;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::graph::csr::LinkGraph;

/// A normalized rank distribution over the pages of a graph
///
/// Shared output type of both estimators: one non-negative score per page,
/// indexed by page ID, summing to 1.0.
#[derive(Debug, Clone, Serialize)]
pub struct RankDistribution {
    /// Scores for each page (indexed by page ID)
    pub scores: Vec<f64>,
}

impl RankDistribution {
    /// Create a new rank distribution
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Get the score for a specific page
    pub fn score(&self, page: u32) -> f64 {
        self.scores.get(page as usize).copied().unwrap_or(0.0)
    }

    /// Total mass of the distribution (1.0 up to floating-point error)
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Number of pages covered
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if the distribution covers no pages
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get top N pages by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        indexed.truncate(n);
        indexed
    }

    /// Pair scores with page names for presentation
    pub fn to_map(&self, graph: &LinkGraph) -> FxHashMap<String, f64> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (graph.name(i as u32).to_string(), s))
            .collect()
    }
}

/// Result of a power-iteration run, with convergence statistics
#[derive(Debug, Clone, Serialize)]
pub struct IterationOutcome {
    /// The converged (or best-so-far) rank distribution
    pub ranks: RankDistribution,
    /// Number of update rounds performed
    pub rounds: usize,
    /// Largest per-page absolute change in the final round
    pub max_delta: f64,
    /// Whether every page's change fell within tolerance
    pub converged: bool,
}
