//! Random-surfer transition model
//!
//! Produces the next-page probability distribution for a single page: with
//! probability `damping` the surfer follows one of the page's outlinks,
//! otherwise it jumps to a uniformly random page. A dangling page teleports
//! uniformly over the whole corpus.

use crate::error::{Error, Result};
use crate::graph::csr::LinkGraph;

/// Compute the next-page distribution for a surfer currently on `page`
///
/// Returns a dense probability vector with one entry per page, summing
/// to 1.0. Every page receives the base probability `(1 - damping) / n`;
/// each outlink target additionally receives `damping / degree(page)`.
/// If `page` is dangling the distribution is exactly uniform (`1 / n`);
/// damping plays no role in that branch.
///
/// Pure function: no side effects, safe to call concurrently.
pub fn transition(graph: &LinkGraph, page: u32, damping: f64) -> Result<Vec<f64>> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    validate_damping(damping)?;
    if page as usize >= graph.num_pages {
        return Err(Error::UnknownPage(format!("page id {page}")));
    }

    let n = graph.num_pages;
    let degree = graph.degree(page);

    // Dangling page: uniform teleport over the whole corpus, itself included
    if degree == 0 {
        return Ok(vec![1.0 / n as f64; n]);
    }

    let mut probs = vec![(1.0 - damping) / n as f64; n];
    let link_share = damping / degree as f64;
    for target in graph.outlinks(page) {
        probs[target as usize] += link_share;
    }

    Ok(probs)
}

/// Compute the next-page distribution for a page identified by name
pub fn transition_for(graph: &LinkGraph, page: &str, damping: f64) -> Result<Vec<f64>> {
    let id = graph
        .page_id(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    transition(graph, id, damping)
}

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidParameter(format!(
            "damping factor must be in [0,1], got {damping}"
        )));
    }
    Ok(())
}
