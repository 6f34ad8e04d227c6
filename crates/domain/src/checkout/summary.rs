//! Order summary pricing.

use common::Money;
use serde::Serialize;

use crate::cart::Cart;

/// Sales tax rate in basis points (8%).
pub const TAX_RATE_BASIS_POINTS: i64 = 800;

/// Priced breakdown of a cart, as shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    /// Total units across all entries.
    pub item_count: u64,

    /// Undiscounted sum of `price * quantity`.
    pub subtotal: Money,

    /// Shipping charge. Every order ships free.
    pub shipping: Money,

    /// Tax on the subtotal, rounded to the cent.
    pub tax: Money,

    /// `subtotal + shipping + tax`.
    pub total: Money,
}

impl CheckoutSummary {
    /// Prices the current cart contents.
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total_price();
        let shipping = Money::zero();
        let tax = subtotal.percentage(TAX_RATE_BASIS_POINTS);

        Self {
            item_count: cart.total_items(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Returns true if shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
