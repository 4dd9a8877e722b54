//! Error taxonomy for ranking operations.
//!
//! Every failure here is caused by invalid input and is detected before any
//! arithmetic runs. The algorithms themselves are pure in-memory computations
//! with no transient failure modes.

/// Errors reported by graph construction and the ranking algorithms.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied graph has zero pages. All probability normalizations
    /// divide by the page count, so an empty graph is rejected up front.
    #[error("empty graph: at least one page is required")]
    EmptyGraph,

    /// A configuration value is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The transition model was asked about a page that is not in the graph.
    #[error("unknown page: {0}")]
    UnknownPage(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
