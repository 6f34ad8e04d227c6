//! Client-side state for the storefront.
//!
//! This crate provides:
//! - `StoreState` and `Intent` traits for reducer-driven state
//! - `Store`, which hydrates, reduces, notifies and persists
//! - Cart, wishlist and comparison states with their store operations
//! - Checkout pricing and a simulated order flow

pub mod cart;
pub mod checkout;
pub mod compare;
pub mod session;
pub mod state;
pub mod store;
pub mod wishlist;

pub use cart::{CART_STORAGE_KEY, Cart, CartAction, CartItem, CartStore};
pub use compare::{COMPARE_STORAGE_KEY, Compare, CompareAction, CompareStore, MAX_COMPARE_ITEMS};
pub use checkout::{
    Checkout, CheckoutError, CheckoutSummary, OrderConfirmation, PaymentProcessor,
    PaymentReceipt, ShippingDetails, SimulatedPayment,
};
pub use session::Session;
pub use state::{Intent, StoreState, Transition};
pub use store::{Store, SubscriptionId};
pub use wishlist::{WISHLIST_STORAGE_KEY, Wishlist, WishlistAction, WishlistItem, WishlistStore};
