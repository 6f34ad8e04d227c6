//! Side-by-side comparison list.

mod actions;
mod state;
mod store;

pub use actions::CompareAction;
pub use state::{COMPARE_STORAGE_KEY, Compare, MAX_COMPARE_ITEMS};
pub use store::CompareStore;
