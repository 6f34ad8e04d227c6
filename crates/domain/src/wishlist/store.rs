//! Wishlist store operations.

use chrono::Utc;
use common::{Product, ProductId};
use storage::KeyValueStore;

use crate::store::Store;

use super::{Wishlist, WishlistAction};

/// The wishlist store.
pub type WishlistStore<P> = Store<Wishlist, P>;

impl<P: KeyValueStore> Store<Wishlist, P> {
    /// Adds a product stamped with the current time, unless already present.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_wishlist(&mut self, product: Product) {
        self.dispatch(WishlistAction::Add {
            product,
            added_at: Utc::now(),
        });
    }

    /// Removes the entry for a product, if present.
    #[tracing::instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) {
        self.dispatch(WishlistAction::Remove {
            product_id: product_id.clone(),
        });
    }

    /// Empties the wishlist.
    #[tracing::instrument(skip(self))]
    pub fn clear_wishlist(&mut self) {
        self.dispatch(WishlistAction::Clear);
    }

    /// Returns true if the product is on the wishlist.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.state().contains(product_id)
    }

    /// Returns the number of entries. Each product counts once.
    pub fn total_items(&self) -> usize {
        self.state().len()
    }
}
