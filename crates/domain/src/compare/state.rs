use common::{Product, ProductId};

use crate::state::{StoreState, Transition};

use super::CompareAction;

/// Persistence key for the comparison list.
pub const COMPARE_STORAGE_KEY: &str = "swalay-compare";

/// Maximum number of products compared at once.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Products selected for comparison, in the order they were picked.
///
/// Holds at most [`MAX_COMPARE_ITEMS`] distinct products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compare {
    items: Vec<Product>,
}

impl Compare {
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|product| &product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true once no further product can be added.
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARE_ITEMS
    }
}

impl StoreState for Compare {
    type Action = CompareAction;
    type Item = Product;

    fn storage_key() -> &'static str {
        COMPARE_STORAGE_KEY
    }

    fn reduce(&self, action: CompareAction) -> Transition<Self> {
        match action {
            CompareAction::Add { product } => {
                if self.is_full() || self.contains(&product.id) {
                    return Transition::Unchanged;
                }
                let mut items = self.items.clone();
                items.push(product);
                Transition::Changed(Compare { items })
            }
            CompareAction::Remove { product_id } => {
                if !self.contains(&product_id) {
                    return Transition::Unchanged;
                }
                let items = self
                    .items
                    .iter()
                    .filter(|product| product.id != product_id)
                    .cloned()
                    .collect();
                Transition::Changed(Compare { items })
            }
            CompareAction::Clear if self.is_empty() => Transition::Unchanged,
            CompareAction::Clear => Transition::Changed(Compare::default()),
            CompareAction::Load { items } => {
                // Keep the first occurrence of each product, then cap.
                let mut loaded: Vec<Product> = Vec::with_capacity(MAX_COMPARE_ITEMS);
                for product in items {
                    if loaded.len() == MAX_COMPARE_ITEMS {
                        break;
                    }
                    if !loaded.iter().any(|seen| seen.id == product.id) {
                        loaded.push(product);
                    }
                }
                let loaded = Compare { items: loaded };
                if loaded == *self {
                    Transition::Unchanged
                } else {
                    Transition::Changed(loaded)
                }
            }
        }
    }

    fn items(&self) -> &[Product] {
        &self.items
    }

    fn load(items: Vec<Product>) -> CompareAction {
        CompareAction::Load { items }
    }
}
