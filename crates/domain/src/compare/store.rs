//! Comparison store operations.

use common::{Product, ProductId};
use storage::KeyValueStore;

use crate::store::Store;

use super::{Compare, CompareAction};

/// The comparison store.
pub type CompareStore<P> = Store<Compare, P>;

impl<P: KeyValueStore> Store<Compare, P> {
    /// Adds a product to the comparison.
    ///
    /// Returns false if the product was already present or the list is full.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_compare(&mut self, product: Product) -> bool {
        let added = self.dispatch(CompareAction::Add { product });
        if !added && self.state().is_full() {
            tracing::debug!("comparison list is full");
        }
        added
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_from_compare(&mut self, product_id: &ProductId) {
        self.dispatch(CompareAction::Remove {
            product_id: product_id.clone(),
        });
    }

    #[tracing::instrument(skip(self))]
    pub fn clear_compare(&mut self) {
        self.dispatch(CompareAction::Clear);
    }

    pub fn is_in_compare(&self, product_id: &ProductId) -> bool {
        self.state().contains(product_id)
    }

    /// Returns true once no further product can be added.
    pub fn is_compare_full(&self) -> bool {
        self.state().is_full()
    }

    pub fn total_items(&self) -> usize {
        self.state().len()
    }
}
