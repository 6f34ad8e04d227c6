use common::{Product, ProductId};

use crate::state::Intent;

/// Intents accepted by the comparison list.
#[derive(Debug, Clone)]
pub enum CompareAction {
    /// Append a product. Ignored for duplicates or when the list is full.
    Add { product: Product },

    Remove { product_id: ProductId },

    Clear,

    /// Replace the list with hydrated products.
    Load { items: Vec<Product> },
}

impl Intent for CompareAction {
    fn kind(&self) -> &'static str {
        match self {
            CompareAction::Add { .. } => "AddToCompare",
            CompareAction::Remove { .. } => "RemoveFromCompare",
            CompareAction::Clear => "ClearCompare",
            CompareAction::Load { .. } => "LoadCompare",
        }
    }
}
