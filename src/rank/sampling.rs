//! Monte Carlo rank estimation by random-walk sampling
//!
//! Simulates a long random walk driven by the transition model and uses
//! visit frequencies as the rank estimate. The walk is inherently
//! sequential, but independent walks can run in parallel and be averaged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::transition::{transition, validate_damping};
use super::RankDistribution;
use crate::error::{Error, Result};
use crate::graph::csr::LinkGraph;

/// Monte Carlo rank estimator
///
/// Expected value converges to the true stationary distribution as the
/// sample count grows; individual runs vary unless the random source is
/// seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingEstimator {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Number of walk steps to sample
    pub samples: usize,
}

impl Default for SamplingEstimator {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

impl SamplingEstimator {
    /// Create a new SamplingEstimator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of walk steps
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Run a single random walk using the supplied random source
    ///
    /// The walk starts on a uniformly random page. Each step records a
    /// visit to the current page, computes that page's transition
    /// distribution, and draws the next page by weighted selection.
    /// Visit counts are scaled by `1/samples` at the end, so the result
    /// sums to 1.0 by construction.
    pub fn run<R: Rng>(&self, graph: &LinkGraph, rng: &mut R) -> Result<RankDistribution> {
        self.validate(graph)?;

        let n = graph.num_pages;
        let mut visits = vec![0u64; n];
        let mut current = rng.gen_range(0..n as u32);

        for _ in 0..self.samples {
            visits[current as usize] += 1;
            let probs = transition(graph, current, self.damping)?;
            current = draw_weighted(rng, &probs);
        }

        trace!(samples = self.samples, pages = n, "random walk finished");

        let scale = 1.0 / self.samples as f64;
        let scores = visits.iter().map(|&v| v as f64 * scale).collect();
        Ok(RankDistribution::new(scores))
    }

    /// Run a single reproducible walk from a seed
    pub fn run_seeded(&self, graph: &LinkGraph, seed: u64) -> Result<RankDistribution> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(graph, &mut rng)
    }

    /// Run several independent walks in parallel and average the estimates
    ///
    /// Walk `k` is seeded with `seed + k`, so the combined estimate is
    /// reproducible. All walks use the same step count, so the average is a
    /// plain mean and still sums to 1.0.
    pub fn run_averaged(
        &self,
        graph: &LinkGraph,
        walks: usize,
        seed: u64,
    ) -> Result<RankDistribution> {
        self.validate(graph)?;
        if walks == 0 {
            return Err(Error::InvalidParameter(
                "walk count must be at least 1".to_string(),
            ));
        }

        let partials: Vec<Vec<f64>> = (0..walks)
            .into_par_iter()
            .map(|k| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
                self.run(graph, &mut rng).map(|d| d.scores)
            })
            .collect::<Result<_>>()?;

        let mut scores = vec![0.0; graph.num_pages];
        for partial in &partials {
            for (total, &s) in scores.iter_mut().zip(partial.iter()) {
                *total += s;
            }
        }
        for s in &mut scores {
            *s /= walks as f64;
        }

        Ok(RankDistribution::new(scores))
    }

    fn validate(&self, graph: &LinkGraph) -> Result<()> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }
        validate_damping(self.damping)?;
        if self.samples == 0 {
            return Err(Error::InvalidParameter(
                "sample count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Draw an index from a dense probability distribution
///
/// `probs` must be non-negative and sum to 1.0; the last index absorbs any
/// floating-point shortfall.
fn draw_weighted<R: Rng>(rng: &mut R, probs: &[f64]) -> u32 {
    let mut remainder: f64 = rng.gen();
    for (i, &p) in probs.iter().enumerate() {
        if remainder < p {
            return i as u32;
        }
        remainder -= p;
    }
    (probs.len() - 1) as u32
}
