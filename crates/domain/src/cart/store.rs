//! Cart store operations.

use common::{Money, Product, ProductId};
use storage::KeyValueStore;

use crate::store::Store;

use super::{Cart, CartAction};

/// The cart store.
pub type CartStore<P> = Store<Cart, P>;

impl<P: KeyValueStore> Store<Cart, P> {
    /// Adds `quantity` units of a product.
    ///
    /// An existing entry has `quantity` added to it; otherwise a new entry is
    /// appended. Inventory limits are the caller's concern. A quantity of 0
    /// is ignored.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        self.dispatch(CartAction::Add { product, quantity });
    }

    /// Removes the entry for a product, if present.
    #[tracing::instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.dispatch(CartAction::Remove {
            product_id: product_id.clone(),
        });
    }

    /// Sets the quantity of an entry in place; zero or less removes it.
    #[tracing::instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Returns the sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.state().total_items()
    }

    /// Returns the undiscounted sum of `price * quantity`.
    pub fn total_price(&self) -> Money {
        self.state().total_price()
    }

    /// Returns true if the cart has an entry for the product.
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.state().contains(product_id)
    }
}
