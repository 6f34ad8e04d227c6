//! Wishlist intents.

use chrono::{DateTime, Utc};
use common::{Product, ProductId};

use crate::state::Intent;

use super::WishlistItem;

/// Intents accepted by the wishlist.
#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Add a product unless it is already present.
    Add {
        product: Product,
        added_at: DateTime<Utc>,
    },

    /// Remove the entry for a product.
    Remove { product_id: ProductId },

    /// Remove every entry.
    Clear,

    /// Replace the wishlist with hydrated items.
    Load { items: Vec<WishlistItem> },
}

impl Intent for WishlistAction {
    fn kind(&self) -> &'static str {
        match self {
            WishlistAction::Add { .. } => "AddToWishlist",
            WishlistAction::Remove { .. } => "RemoveFromWishlist",
            WishlistAction::Clear => "ClearWishlist",
            WishlistAction::Load { .. } => "LoadWishlist",
        }
    }
}
