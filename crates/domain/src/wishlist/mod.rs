//! Wishlist state, intents and store operations.

mod actions;
mod state;
mod store;

pub use actions::WishlistAction;
pub use state::{WISHLIST_STORAGE_KEY, Wishlist, WishlistItem};
pub use store::WishlistStore;
