use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::{Cart, CartLine};

/// Confirmation of a completed (mocked) checkout. No payment is taken; the
/// receipt only records what the cart held when it was cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total: Decimal,
}

impl CheckoutReceipt {
    pub fn for_cart(cart: &Cart) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines: cart.lines().to_vec(),
            item_count: cart.total_item_count(),
            total: cart.total_price(),
        }
    }
}
