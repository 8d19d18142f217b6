use rust_decimal::Decimal;

use super::product::{Product, RawProduct};

/// The immutable product list for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Normalize raw entries, dropping those without an id.
    pub fn from_raw(raw: Vec<RawProduct>, default_price: Decimal) -> Self {
        let products = raw
            .into_iter()
            .filter_map(|p| Product::from_raw(p, default_price))
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Up to `count` products starting at `start`; empty past the end.
    pub fn slice(&self, start: usize, count: usize) -> &[Product] {
        let start = start.min(self.products.len());
        let end = start.saturating_add(count).min(self.products.len());
        &self.products[start..end]
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Position of a product in catalog order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Every product whose name contains `term` (case-insensitive), in
    /// catalog order. The term is trimmed and lowercased here.
    pub fn search(&self, term: &str) -> Vec<Product> {
        let needle = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name_matches(&needle))
            .cloned()
            .collect()
    }
}
