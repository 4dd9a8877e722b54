//! Corpus graph builder with deferred link resolution
//!
//! This module provides a mutable builder that uses FxHashMap for O(1)
//! page interning during corpus construction. Links are recorded by name
//! and resolved when the builder is frozen into a CSR graph, because a
//! link may point at a page that has not been registered yet.

use rustc_hash::FxHashMap;

/// A mutable corpus builder optimized for incremental construction
///
/// Pages are interned to dense `u32` ids in registration order. Links are
/// kept as `(source id, target name)` pairs; targets that never become
/// pages are dropped at freeze time, along with self-links.
#[derive(Debug)]
pub struct CorpusBuilder {
    /// Maps page name -> page ID
    name_to_id: FxHashMap<String, u32>,
    /// Page names in ID order
    names: Vec<String>,
    /// Recorded links: (source page ID, unresolved target name)
    links: Vec<(u32, String)>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    /// Create a new empty corpus builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            names: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Create a corpus builder with pre-allocated capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            names: Vec::with_capacity(page_capacity),
            links: Vec::new(),
        }
    }

    /// Get or create a page for the given name, returning its ID
    pub fn add_page(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.names.len() as u32;
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Record a directed link from one page to another, by name
    ///
    /// The source is registered as a page immediately (links are only ever
    /// observed while parsing the source document). The target is resolved
    /// when the graph is frozen; if it never becomes a page of the corpus
    /// the link is dropped, and self-links are dropped as well.
    pub fn add_link(&mut self, from: &str, to: &str) {
        let from_id = self.add_page(from);
        self.links.push((from_id, to.to_string()));
    }

    /// Get the number of registered pages
    pub fn page_count(&self) -> usize {
        self.names.len()
    }

    /// Get a page ID by name
    pub fn page_id(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Get the name for a page ID
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Check if the builder has no pages
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all page names in ID order
    pub fn pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as u32, n.as_str()))
    }

    /// The recorded raw links, unresolved
    pub fn links(&self) -> &[(u32, String)] {
        &self.links
    }
}
