//! Corpus graph construction and representation
//!
//! This module provides incremental graph building from raw page links
//! and an immutable CSR representation consumed by the ranking algorithms.

pub mod builder;
pub mod csr;
