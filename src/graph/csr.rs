//! Compressed Sparse Row (CSR) link graph representation
//!
//! CSR stores outlinks contiguously, making iteration over a page's link
//! targets very fast. This is ideal for both ranking algorithms, which
//! repeatedly walk outlink lists.

use rustc_hash::FxHashSet;

use super::builder::CorpusBuilder;

/// A directed link graph in Compressed Sparse Row format
///
/// Immutable once built: the ranking algorithms only read it, so a single
/// graph can be shared freely across concurrent computations. A page with
/// no outlinks (a dangling page) stays in the graph; the algorithms treat
/// it as linking implicitly to every page, itself included.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Number of pages
    pub num_pages: usize,
    /// Row pointers: page i's outlinks are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (link targets) for each outlink
    pub col_idx: Vec<u32>,
    /// Outlink count for each page
    pub out_degree: Vec<u32>,
    /// Page names in ID order
    pub names: Vec<String>,
}

impl LinkGraph {
    /// Freeze a CorpusBuilder into CSR format
    ///
    /// This is where the corpus invariants are enforced: self-links and
    /// links to targets outside the corpus are dropped, and duplicate
    /// links collapse to a single edge.
    pub fn from_builder(builder: &CorpusBuilder) -> Self {
        let num_pages = builder.page_count();

        // Resolve raw links against the final page set
        let mut outlinks: Vec<FxHashSet<u32>> = vec![FxHashSet::default(); num_pages];
        for (from, target_name) in builder.links() {
            if let Some(to) = builder.page_id(target_name) {
                if to != *from {
                    outlinks[*from as usize].insert(to);
                }
            }
        }

        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        let mut col_idx = Vec::new();
        let mut out_degree = Vec::with_capacity(num_pages);
        let mut names = Vec::with_capacity(num_pages);

        row_ptr.push(0);

        for (id, name) in builder.pages() {
            names.push(name.to_string());

            // Sort targets for deterministic iteration
            let mut targets: Vec<u32> = outlinks[id as usize].iter().copied().collect();
            targets.sort_unstable();

            out_degree.push(targets.len() as u32);
            col_idx.extend_from_slice(&targets);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_pages,
            row_ptr,
            col_idx,
            out_degree,
            names,
        }
    }

    /// Iterate over the outlink targets of a page
    pub fn outlinks(&self, page: u32) -> impl Iterator<Item = u32> + '_ {
        let start = self.row_ptr[page as usize];
        let end = self.row_ptr[page as usize + 1];
        self.col_idx[start..end].iter().copied()
    }

    /// Get the out-degree of a page
    pub fn degree(&self, page: u32) -> u32 {
        self.out_degree[page as usize]
    }

    /// Check whether a page links to a specific target
    pub fn links_to(&self, page: u32, target: u32) -> bool {
        let start = self.row_ptr[page as usize];
        let end = self.row_ptr[page as usize + 1];
        self.col_idx[start..end].binary_search(&target).is_ok()
    }

    /// Get the name for a page ID
    pub fn name(&self, page: u32) -> &str {
        &self.names[page as usize]
    }

    /// Get a page ID by name (linear search - use sparingly)
    pub fn page_id(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// Check whether a page with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.page_id(name).is_some()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_pages == 0
    }

    /// Get the total number of retained links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling pages (pages with no outlinks)
    pub fn dangling_pages(&self) -> Vec<u32> {
        (0..self.num_pages as u32)
            .filter(|&p| self.out_degree[p as usize] == 0)
            .collect()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self {
            num_pages: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            names: Vec::new(),
        }
    }
}
