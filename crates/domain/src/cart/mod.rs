//! Cart state, intents and store operations.

mod actions;
mod state;
mod store;

pub use actions::CartAction;
pub use state::{CART_STORAGE_KEY, Cart, CartItem};
pub use store::CartStore;
