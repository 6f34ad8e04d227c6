//! Wishlist state and reducer.

use chrono::{DateTime, Utc};
use common::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::state::{StoreState, Transition};

use super::WishlistAction;

/// Persistence key for the wishlist.
pub const WISHLIST_STORAGE_KEY: &str = "swalay-wishlist";

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product: Product,

    /// When the product was first added. Never refreshed by repeat adds.
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Creates a new wishlist item.
    pub fn new(product: Product, added_at: DateTime<Utc>) -> Self {
        Self { product, added_at }
    }

    /// Returns the item's identifier.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Ordered wishlist contents, at most one entry per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Returns all entries in insertion order.
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Returns the entry for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Returns true if the product is on the wishlist.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the wishlist has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StoreState for Wishlist {
    type Action = WishlistAction;
    type Item = WishlistItem;

    fn storage_key() -> &'static str {
        WISHLIST_STORAGE_KEY
    }

    fn reduce(&self, action: WishlistAction) -> Transition<Self> {
        match action {
            WishlistAction::Add { product, added_at } => {
                if self.contains(&product.id) {
                    return Transition::Unchanged;
                }
                let mut items = self.items.clone();
                items.push(WishlistItem::new(product, added_at));
                Transition::Changed(Wishlist { items })
            }
            WishlistAction::Remove { product_id } => {
                if !self.contains(&product_id) {
                    return Transition::Unchanged;
                }
                let items = self
                    .items
                    .iter()
                    .filter(|item| *item.product_id() != product_id)
                    .cloned()
                    .collect();
                Transition::Changed(Wishlist { items })
            }
            WishlistAction::Clear if self.is_empty() => Transition::Unchanged,
            WishlistAction::Clear => Transition::Changed(Wishlist::default()),
            WishlistAction::Load { items } => {
                let mut loaded: Vec<WishlistItem> = Vec::with_capacity(items.len());
                for item in items {
                    if !loaded.iter().any(|seen| seen.product_id() == item.product_id()) {
                        loaded.push(item);
                    }
                }
                let loaded = Wishlist { items: loaded };
                if loaded == *self {
                    Transition::Unchanged
                } else {
                    Transition::Changed(loaded)
                }
            }
        }
    }

    fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    fn load(items: Vec<WishlistItem>) -> WishlistAction {
        WishlistAction::Load { items }
    }
}
