//! `linkrank`: PageRank estimation over a hyper-linked corpus.
//!
//! Given a directed graph of pages and their outbound links, this crate
//! computes a stationary importance distribution over pages by two
//! independent methods:
//!
//! - [`SamplingEstimator`] — Monte Carlo random-walk sampling driven by the
//!   per-page [`transition`] model;
//! - [`IterativeSolver`] — deterministic power iteration of the PageRank
//!   recurrence.
//!
//! Public invariants (must not drift):
//! - **Normalization**: both estimators return one non-negative score per
//!   page, summing to 1.0 (exactly for sampling, within floating-point
//!   tolerance for iteration).
//! - **Dangling pages**: a page without outlinks is treated as linking
//!   uniformly to every page, itself included, never as a dead end.
//! - **Determinism**: the solver is bit-for-bit reproducible; the sampler
//!   is reproducible given a seed.
//! - **Fail-fast validation**: empty graphs and out-of-range parameters are
//!   rejected before any arithmetic runs.
//!
//! # Quick start
//!
//! ```rust
//! use linkrank::{CorpusBuilder, IterativeSolver, LinkGraph, SamplingEstimator};
//!
//! let mut builder = CorpusBuilder::new();
//! builder.add_link("1.html", "2.html");
//! builder.add_link("2.html", "1.html");
//! builder.add_link("3.html", "1.html");
//! let graph = LinkGraph::from_builder(&builder);
//!
//! let sampled = SamplingEstimator::new().run_seeded(&graph, 42)?;
//! let iterated = IterativeSolver::new().solve(&graph)?;
//!
//! assert!((sampled.sum() - 1.0).abs() < 1e-9);
//! assert!((iterated.sum() - 1.0).abs() < 1e-9);
//! # Ok::<(), linkrank::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod rank;

pub use error::{Error, Result};
pub use graph::builder::CorpusBuilder;
pub use graph::csr::LinkGraph;
pub use rank::iteration::IterativeSolver;
pub use rank::sampling::SamplingEstimator;
pub use rank::transition::{transition, transition_for};
pub use rank::{IterationOutcome, RankDistribution};
