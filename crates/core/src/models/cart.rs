use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::product::Product;

/// One product in the cart.
///
/// The aliases accept carts persisted by older builds of the storefront,
/// which stored `{ id, name, image, price, quantity }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(alias = "id")]
    pub product_id: String,
    pub name: String,
    #[serde(alias = "image")]
    pub image_url: String,
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        image_url: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            image_url: image_url.into(),
            unit_price,
            quantity,
        }
    }

    /// Line for `quantity` units of a catalog product, priced at its base
    /// price and shown with the small image.
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self::new(
            product.id.clone(),
            product.name.clone(),
            product.images.small.clone(),
            product.base_price,
            quantity,
        )
    }

    /// Unrounded `unit_price × quantity`, or `None` if it does not fit in a
    /// `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

fn checked_total(lines: &[CartLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.subtotal()?))
}

/// Insertion-ordered cart lines.
///
/// Invariants: at most one line per product id, no zero quantity, no
/// negative unit price, and a total price that fits in a `Decimal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLine>::deserialize(deserializer).map(Self::from_lines)
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from arbitrary lines. Lines `add` would refuse are
    /// dropped and duplicate ids are merged into the first occurrence.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line);
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Increment an existing line by `line.quantity`, or append the line.
    /// Returns `true` if the cart changed.
    ///
    /// Refused (returns `false`, cart untouched): zero units, a negative unit
    /// price, or a change that would push the total past `Decimal::MAX`.
    pub fn add(&mut self, line: CartLine) -> bool {
        if line.quantity == 0 || line.unit_price < Decimal::ZERO {
            return false;
        }
        let mut next = self.lines.clone();
        match next.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => next.push(line),
        }
        self.replace_if_representable(next)
    }

    /// Overwrite a line's quantity; a quantity of zero or less removes it.
    /// Returns `false` if no line has this id or the new total would not
    /// fit in a `Decimal`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        let Some(idx) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return false;
        };
        if quantity <= 0 {
            self.lines.remove(idx);
            return true;
        }
        let mut next = self.lines.clone();
        next[idx].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.replace_if_representable(next)
    }

    fn replace_if_representable(&mut self, next: Vec<CartLine>) -> bool {
        if checked_total(&next).is_none() {
            return false;
        }
        self.lines = next;
        true
    }

    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Exact sum of `unit_price × quantity`. Rounding is left to display.
    pub fn total_price(&self) -> Decimal {
        // Every line was admitted by `add`, which keeps the sum representable.
        checked_total(&self.lines).unwrap_or(Decimal::MAX)
    }
}
