//! Cart state and reducer.

use common::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::state::{StoreState, Transition};

use super::CartAction;

/// Persistence key for the cart.
pub const CART_STORAGE_KEY: &str = "swalay-cart";

/// A product selected for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product record as it was when added.
    pub product: Product,

    /// Units selected, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the item's identifier.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns `price * quantity`.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}

/// Ordered cart contents.
///
/// Holds at most one entry per product, in first-added order. Quantity
/// updates keep an entry in place; only removal and re-adding move it to
/// the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

// Query methods
impl Cart {
    /// Returns all entries in order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the entry for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Returns true if the cart has an entry for the product.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Returns the undiscounted sum of `price * quantity`.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }
}

impl StoreState for Cart {
    type Action = CartAction;
    type Item = CartItem;

    fn storage_key() -> &'static str {
        CART_STORAGE_KEY
    }

    fn reduce(&self, action: CartAction) -> Transition<Self> {
        match action {
            CartAction::Add { product, quantity } => self.reduce_add(product, quantity),
            CartAction::Remove { product_id } => self.reduce_remove(&product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.reduce_update_quantity(&product_id, quantity),
            CartAction::Clear => {
                if self.is_empty() {
                    Transition::Unchanged
                } else {
                    Transition::Changed(Cart::default())
                }
            }
            CartAction::Load { items } => {
                let loaded = Cart::normalized(items);
                if loaded == *self {
                    Transition::Unchanged
                } else {
                    Transition::Changed(loaded)
                }
            }
        }
    }

    fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn load(items: Vec<CartItem>) -> CartAction {
        CartAction::Load { items }
    }
}

// Reducer helpers
impl Cart {
    fn reduce_add(&self, product: Product, quantity: u32) -> Transition<Self> {
        if quantity == 0 {
            return Transition::Unchanged;
        }

        let mut items = self.items.clone();
        match self.position(&product.id) {
            Some(index) => {
                let item = &mut items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => items.push(CartItem::new(product, quantity)),
        }
        Transition::Changed(Cart { items })
    }

    fn reduce_remove(&self, product_id: &ProductId) -> Transition<Self> {
        if !self.contains(product_id) {
            return Transition::Unchanged;
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.product_id() != product_id)
            .cloned()
            .collect();
        Transition::Changed(Cart { items })
    }

    fn reduce_update_quantity(&self, product_id: &ProductId, quantity: i64) -> Transition<Self> {
        if quantity <= 0 {
            return self.reduce_remove(product_id);
        }

        let Some(index) = self.position(product_id) else {
            return Transition::Unchanged;
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if self.items[index].quantity == quantity {
            return Transition::Unchanged;
        }

        let mut items = self.items.clone();
        items[index].quantity = quantity;
        Transition::Changed(Cart { items })
    }

    /// Rebuilds a cart from untrusted items.
    ///
    /// Zero-quantity entries are dropped and repeated products are merged
    /// into their first position.
    fn normalized(items: Vec<CartItem>) -> Cart {
        let mut cart = Cart::default();
        for item in items {
            if let Transition::Changed(next) = cart.reduce_add(item.product, item.quantity) {
                cart = next;
            }
        }
        cart
    }
}
