//! Deterministic rank estimation by power iteration
//!
//! Computes the fixed point of the PageRank recurrence with proper
//! handling of dangling pages: their rank mass is redistributed uniformly
//! over every page (themselves included) each round.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::transition::validate_damping;
use super::{IterationOutcome, RankDistribution};
use crate::error::{Error, Result};
use crate::graph::csr::LinkGraph;

/// Power-iteration rank solver
///
/// Bit-for-bit reproducible: the same graph, damping factor, and tolerance
/// always produce the same output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterativeSolver {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Per-page convergence tolerance (absolute change)
    pub tolerance: f64,
    /// Safety cap on update rounds
    pub max_rounds: usize,
}

impl Default for IterativeSolver {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-3,
            max_rounds: 100,
        }
    }
}

impl IterativeSolver {
    /// Create a new IterativeSolver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of update rounds
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Run power iteration on a graph
    ///
    /// Every page starts at `1/n`. Each round recomputes all ranks
    /// simultaneously from the previous round's values and stops once no
    /// page changed by more than the tolerance. Hitting the round cap
    /// returns the current distribution with `converged = false`.
    pub fn run(&self, graph: &LinkGraph) -> Result<IterationOutcome> {
        self.validate(graph)?;

        let n = graph.num_pages;
        let n_f64 = n as f64;
        let mut scores = vec![1.0 / n_f64; n];
        let mut new_scores = vec![0.0; n];

        let dangling_pages = graph.dangling_pages();
        let teleport = (1.0 - self.damping) / n_f64;

        let mut rounds = 0;
        let mut max_delta = f64::MAX;

        while rounds < self.max_rounds && max_delta > self.tolerance {
            rounds += 1;

            // Dangling mass reaches every page, including dangling pages
            // themselves; this is independent of outlink contributions.
            let dangling_mass: f64 = dangling_pages.iter().map(|&d| scores[d as usize]).sum();
            let dangling_share = self.damping * dangling_mass / n_f64;

            new_scores.fill(teleport + dangling_share);

            // Scatter each page's damped rank share to its link targets
            for (page, &score) in scores.iter().enumerate() {
                let degree = graph.degree(page as u32);
                if degree > 0 {
                    let share = self.damping * score / degree as f64;
                    for target in graph.outlinks(page as u32) {
                        new_scores[target as usize] += share;
                    }
                }
            }

            // Convergence test: largest per-page absolute change
            max_delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let converged = max_delta <= self.tolerance;
        debug!(rounds, max_delta, converged, "power iteration finished");

        // Renormalize for numerical stability; the sum is already ~1
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        Ok(IterationOutcome {
            ranks: RankDistribution::new(scores),
            rounds,
            max_delta,
            converged,
        })
    }

    /// Run power iteration and return only the rank distribution
    pub fn solve(&self, graph: &LinkGraph) -> Result<RankDistribution> {
        self.run(graph).map(|outcome| outcome.ranks)
    }

    fn validate(&self, graph: &LinkGraph) -> Result<()> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }
        validate_damping(self.damping)?;
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.max_rounds == 0 {
            return Err(Error::InvalidParameter(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::CorpusBuilder;

    fn build_corpus() -> LinkGraph {
        // a <-> b, c -> a, d dangling
        let mut builder = CorpusBuilder::new();
        builder.add_link("a.html", "b.html");
        builder.add_link("b.html", "a.html");
        builder.add_link("c.html", "a.html");
        builder.add_page("d.html");
        LinkGraph::from_builder(&builder)
    }

    #[test]
    fn test_mutual_link_pair_converges_to_half() {
        let mut builder = CorpusBuilder::new();
        builder.add_link("a.html", "b.html");
        builder.add_link("b.html", "a.html");
        let graph = LinkGraph::from_builder(&builder);

        let outcome = IterativeSolver::new().run(&graph).unwrap();

        assert!(outcome.converged);
        // The uniform start is already the fixed point
        assert_eq!(outcome.ranks.scores[0], 0.5);
        assert_eq!(outcome.ranks.scores[1], 0.5);
    }

    #[test]
    fn test_dangling_page_redistributed() {
        // a has no outlinks; b links only to a
        let mut builder = CorpusBuilder::new();
        builder.add_page("a.html");
        builder.add_link("b.html", "a.html");
        let graph = LinkGraph::from_builder(&builder);

        let ranks = IterativeSolver::new().solve(&graph).unwrap();

        assert!(ranks.scores.iter().all(|&s| s > 0.0));
        assert!((ranks.sum() - 1.0).abs() < 1e-9);
        // a receives all of b's link mass, so it must rank higher
        let a = graph.page_id("a.html").unwrap();
        let b = graph.page_id("b.html").unwrap();
        assert!(ranks.score(a) > ranks.score(b));
    }

    #[test]
    fn test_sums_to_one() {
        let graph = build_corpus();
        let ranks = IterativeSolver::new().solve(&graph).unwrap();
        assert!((ranks.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let graph = build_corpus();
        let solver = IterativeSolver::new();

        let a = solver.run(&graph).unwrap();
        let b = solver.run(&graph).unwrap();

        assert_eq!(a.ranks.scores, b.ranks.scores);
        assert_eq!(a.rounds, b.rounds);
    }

    #[test]
    fn test_stricter_tolerance_never_fewer_rounds() {
        let graph = build_corpus();

        let loose = IterativeSolver::new().with_tolerance(1e-3);
        let strict = IterativeSolver::new().with_tolerance(1e-4);

        let loose_rounds = loose.run(&graph).unwrap().rounds;
        let strict_rounds = strict.run(&graph).unwrap().rounds;

        assert!(strict_rounds >= loose_rounds);
    }

    #[test]
    fn test_round_cap_returns_partial() {
        let graph = build_corpus();
        let solver = IterativeSolver::new()
            .with_max_rounds(1)
            .with_tolerance(1e-15);

        let outcome = solver.run(&graph).unwrap();

        assert_eq!(outcome.rounds, 1);
        assert!(!outcome.converged);
        // Still a valid distribution
        assert!((outcome.ranks.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lower_damping_flattens_ranks() {
        let graph = build_corpus();
        let a = graph.page_id("a.html").unwrap();
        let d = graph.page_id("d.html").unwrap();

        let high = IterativeSolver::new().with_damping(0.95).solve(&graph).unwrap();
        let low = IterativeSolver::new().with_damping(0.5).solve(&graph).unwrap();

        // More teleportation narrows the gap between hub and dangling page
        let gap_high = high.score(a) - high.score(d);
        let gap_low = low.score(a) - low.score(d);
        assert!(gap_high > gap_low);
    }

    #[test]
    fn test_empty_graph_rejected() {
        let graph = LinkGraph::default();
        assert!(matches!(
            IterativeSolver::new().run(&graph),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let graph = build_corpus();

        let solver = IterativeSolver::new().with_damping(-0.5);
        assert!(matches!(
            solver.run(&graph),
            Err(Error::InvalidParameter(_))
        ));

        let solver = IterativeSolver::new().with_tolerance(0.0);
        assert!(matches!(
            solver.run(&graph),
            Err(Error::InvalidParameter(_))
        ));

        let solver = IterativeSolver::new().with_max_rounds(0);
        assert!(matches!(
            solver.run(&graph),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_config_deserializes() {
        let solver: IterativeSolver =
            serde_json::from_str(r#"{"damping":0.85,"tolerance":0.0001,"max_rounds":50}"#).unwrap();
        assert_eq!(solver.max_rounds, 50);
        assert!((solver.tolerance - 1e-4).abs() < 1e-12);
    }
}
