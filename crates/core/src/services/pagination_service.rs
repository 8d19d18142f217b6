use tracing::debug;

use crate::models::catalog::Catalog;
use crate::models::pagination::{BrowseMode, PaginationCursor, ProximityTrigger, RevealBatch};
use crate::models::product::Product;

/// A reveal that has been started but not yet handed to the grid.
///
/// While one exists, further `begin_reveal` calls return `None`, so a
/// double-fired proximity signal produces a single batch.
#[derive(Debug)]
#[must_use]
pub struct PendingReveal {
    start: usize,
    generation: u64,
}

/// What the grid should show after the search term changed. The grid is
/// replaced, not appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub products: Vec<Product>,
    pub mode: BrowseMode,
    pub trigger: ProximityTrigger,
}

/// Reveals the catalog to the grid in fixed-size batches, driven by the
/// scroll-proximity observer, and switches to unpaginated results while a
/// search term is set.
#[derive(Debug)]
pub struct PaginationController {
    cursor: PaginationCursor,
    trigger: ProximityTrigger,
    in_flight: bool,
    /// Bumped by every reset; a pending reveal from an older generation is
    /// discarded on completion.
    generation: u64,
    search_results: Vec<Product>,
}

impl PaginationController {
    pub fn new(source_length: usize, page_size: usize) -> Self {
        Self {
            cursor: PaginationCursor::new(source_length, page_size.max(1)),
            trigger: ProximityTrigger::Armed,
            in_flight: false,
            generation: 0,
            search_results: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn trigger(&self) -> ProximityTrigger {
        self.trigger
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Results of the active search; empty while browsing.
    pub fn search_results(&self) -> &[Product] {
        &self.search_results
    }

    /// Back to the start: nothing revealed, no search results, and the
    /// proximity observer armed only when browsing.
    pub fn reset(&mut self, mode: BrowseMode) {
        self.cursor.revealed = 0;
        self.cursor.mode = mode;
        self.search_results.clear();
        self.in_flight = false;
        self.generation = self.generation.wrapping_add(1);
        self.trigger = match mode {
            BrowseMode::Browsing => ProximityTrigger::Armed,
            BrowseMode::Searching => ProximityTrigger::Disarmed,
        };
    }

    /// Start revealing the next batch. Returns `None` (nothing to do) when a
    /// reveal is already in flight, a search is active, or the catalog is
    /// exhausted.
    pub fn begin_reveal(&mut self) -> Option<PendingReveal> {
        if self.in_flight || self.cursor.mode == BrowseMode::Searching {
            return None;
        }
        if self.cursor.is_exhausted() {
            self.trigger = ProximityTrigger::Disarmed;
            return None;
        }
        self.in_flight = true;
        Some(PendingReveal {
            start: self.cursor.revealed,
            generation: self.generation,
        })
    }

    /// Finish a reveal: take up to `page_size` products from `catalog` and
    /// advance the cursor by the number actually returned.
    pub fn complete_reveal(&mut self, catalog: &Catalog, pending: PendingReveal) -> RevealBatch<Product> {
        if pending.generation != self.generation {
            debug!("discarding reveal started before the last reset");
            return RevealBatch::empty(self.cursor.is_exhausted());
        }
        self.in_flight = false;

        let items = catalog.slice(pending.start, self.cursor.page_size).to_vec();
        self.cursor.revealed = (pending.start + items.len()).min(self.cursor.source_length);

        let exhausted = self.cursor.is_exhausted();
        if exhausted {
            self.trigger = ProximityTrigger::Disarmed;
        }
        debug!(
            revealed = self.cursor.revealed,
            batch = items.len(),
            exhausted,
            "revealed catalog batch"
        );
        RevealBatch { items, exhausted }
    }

    /// Reveal the next batch in one step.
    pub fn reveal_next(&mut self, catalog: &Catalog) -> RevealBatch<Product> {
        match self.begin_reveal() {
            Some(pending) => self.complete_reveal(catalog, pending),
            None => RevealBatch::empty(self.cursor.is_exhausted()),
        }
    }

    /// Apply a new search term.
    ///
    /// A non-empty term (after trim and lowercase) shows every product whose
    /// name contains it, unpaginated, and disarms the proximity observer. An
    /// empty term returns to browsing from the first page.
    pub fn set_search_term(&mut self, catalog: &Catalog, term: &str) -> SearchResult {
        let needle = term.trim().to_lowercase();

        if needle.is_empty() {
            self.reset(BrowseMode::Browsing);
            let batch = self.reveal_next(catalog);
            debug!(revealed = self.cursor.revealed, "search cleared");
            return SearchResult {
                products: batch.items,
                mode: BrowseMode::Browsing,
                trigger: self.trigger,
            };
        }

        self.reset(BrowseMode::Searching);
        self.search_results = catalog.search(&needle);
        debug!(term = %needle, matches = self.search_results.len(), "search applied");
        SearchResult {
            products: self.search_results.clone(),
            mode: BrowseMode::Searching,
            trigger: self.trigger,
        }
    }
}
