//! Cart intents.

use common::{Product, ProductId};

use crate::state::Intent;

use super::CartItem;

/// Intents accepted by the cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add `quantity` units of a product, merging with an existing entry.
    Add { product: Product, quantity: u32 },

    /// Remove the entry for a product.
    Remove { product_id: ProductId },

    /// Set the quantity of an existing entry; zero or less removes it.
    UpdateQuantity { product_id: ProductId, quantity: i64 },

    /// Remove every entry.
    Clear,

    /// Replace the cart with hydrated items.
    Load { items: Vec<CartItem> },
}

impl Intent for CartAction {
    fn kind(&self) -> &'static str {
        match self {
            CartAction::Add { .. } => "AddToCart",
            CartAction::Remove { .. } => "RemoveFromCart",
            CartAction::UpdateQuantity { .. } => "UpdateQuantity",
            CartAction::Clear => "ClearCart",
            CartAction::Load { .. } => "LoadCart",
        }
    }
}
