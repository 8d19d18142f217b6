use serde::{Deserialize, Serialize};

/// Whether the grid is paging through the full catalog or showing search
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseMode {
    /// Infinite scroll over the whole catalog.
    Browsing,
    /// Every match shown at once; paging disabled.
    Searching,
}

/// State of the scroll-proximity observer attached to the grid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProximityTrigger {
    Armed,
    /// Detached, either because the catalog is exhausted or a search is active.
    Disarmed,
}

/// How far into the catalog the grid has been revealed.
///
/// Invariant: `revealed <= source_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    pub source_length: usize,
    pub revealed: usize,
    pub page_size: usize,
    pub mode: BrowseMode,
}

impl PaginationCursor {
    pub fn new(source_length: usize, page_size: usize) -> Self {
        Self {
            source_length,
            revealed: 0,
            page_size,
            mode: BrowseMode::Browsing,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.source_length
    }

    pub fn remaining(&self) -> usize {
        self.source_length.saturating_sub(self.revealed)
    }
}

/// A batch handed to the grid by `reveal_next`.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealBatch<T> {
    pub items: Vec<T>,
    /// Set once the whole catalog has been revealed; the proximity observer
    /// should be detached.
    pub exhausted: bool,
}

impl<T> RevealBatch<T> {
    pub fn empty(exhausted: bool) -> Self {
        Self {
            items: Vec::new(),
            exhausted,
        }
    }
}
