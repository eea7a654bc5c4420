use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

static ITEM_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A single line in a user's cart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Unique identifier of the line.
    pub id: String,
    /// Owner of the cart this line belongs to.
    pub user_id: String,
    /// Catalog product referenced by the line; not guaranteed to resolve.
    pub product_id: String,
    /// Number of units, at least one while the line exists.
    pub quantity: i32,
    /// Unit price captured when the line was last added to.
    pub price_snapshot_cents: i64,
}

impl CartItem {
    /// Create a fresh line with a newly generated identifier.
    pub fn new(
        user_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: i32,
        price_snapshot_cents: i64,
    ) -> Self {
        Self {
            id: generate_item_id(),
            user_id: user_id.into(),
            product_id: product_id.into(),
            quantity,
            price_snapshot_cents,
        }
    }

    /// Snapshot price multiplied by quantity.
    pub fn line_total_cents(&self) -> i64 {
        self.price_snapshot_cents * i64::from(self.quantity)
    }
}

/// Produce a process-unique cart line identifier.
pub fn generate_item_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let sequence = ITEM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("ci-{millis}-{sequence:x}")
}

/// Cart line joined with its catalog product for display.
#[derive(Debug, Serialize, Clone)]
pub struct CartLine {
    pub item: CartItem,
    /// `None` when the product no longer exists in the catalog.
    pub product: Option<Product>,
}

impl CartLine {
    /// Lines whose product vanished from the catalog are kept but not shown.
    pub fn is_renderable(&self) -> bool {
        self.product.is_some()
    }
}

/// Spending at or above this amount ships for free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5_000;
/// Shipping charged below the free shipping threshold.
pub const FLAT_SHIPPING_CENTS: i64 = 599;
/// Sales tax in basis points (1/100 of a percent), applied to subtotal plus shipping.
pub const TAX_RATE_BASIS_POINTS: i64 = 800;

/// Order summary derived from the snapshot prices of a cart.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    /// How much more must be spent to qualify for free shipping.
    pub free_shipping_remaining_cents: i64,
    /// Progress towards free shipping, 0 - 100.
    pub free_shipping_progress: u8,
}

impl CartSummary {
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal_cents: i64 = items.iter().map(CartItem::line_total_cents).sum();
        Self::from_subtotal(subtotal_cents, items.is_empty())
    }

    fn from_subtotal(subtotal_cents: i64, empty: bool) -> Self {
        let shipping_cents = if empty || subtotal_cents >= FREE_SHIPPING_THRESHOLD_CENTS {
            0
        } else {
            FLAT_SHIPPING_CENTS
        };
        let taxable = subtotal_cents + shipping_cents;
        let tax_cents = (taxable * TAX_RATE_BASIS_POINTS + 5_000) / 10_000;
        let free_shipping_remaining_cents = (FREE_SHIPPING_THRESHOLD_CENTS - subtotal_cents).max(0);
        let free_shipping_progress =
            (subtotal_cents.max(0) * 100 / FREE_SHIPPING_THRESHOLD_CENTS).min(100) as u8;

        Self {
            subtotal_cents,
            shipping_cents,
            tax_cents,
            total_cents: taxable + tax_cents,
            free_shipping_remaining_cents,
            free_shipping_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i32, price: i64) -> CartItem {
        CartItem::new("user-a", product_id, quantity, price)
    }

    #[test]
    fn generated_ids_are_unique() {
        let first = generate_item_id();
        let second = generate_item_id();

        assert!(first.starts_with("ci-"));
        assert_ne!(first, second);
    }

    #[test]
    fn summary_charges_flat_shipping_below_threshold() {
        let summary = CartSummary::from_items(&[item("8", 2, 1499)]);

        assert_eq!(summary.subtotal_cents, 2998);
        assert_eq!(summary.shipping_cents, FLAT_SHIPPING_CENTS);
        // (2998 + 599) * 8% = 287.76
        assert_eq!(summary.tax_cents, 288);
        assert_eq!(summary.total_cents, 2998 + 599 + 288);
        assert_eq!(summary.free_shipping_remaining_cents, 2002);
        assert_eq!(summary.free_shipping_progress, 59);
    }

    #[test]
    fn summary_ships_free_at_threshold() {
        let summary = CartSummary::from_items(&[item("1", 1, 5000)]);

        assert_eq!(summary.shipping_cents, 0);
        assert_eq!(summary.tax_cents, 400);
        assert_eq!(summary.free_shipping_remaining_cents, 0);
        assert_eq!(summary.free_shipping_progress, 100);
    }

    #[test]
    fn empty_summary_is_zero() {
        assert_eq!(CartSummary::from_items(&[]), CartSummary::default());
    }
}
