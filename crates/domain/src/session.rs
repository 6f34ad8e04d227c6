//! Per-session store context.

use storage::KeyValueStore;

use crate::cart::{Cart, CartStore};
use crate::compare::{Compare, CompareStore};
use crate::store::Store;
use crate::wishlist::{Wishlist, WishlistStore};

/// The cart, wishlist and comparison list for one session.
///
/// Construct one per session and pass it (or the individual stores) to
/// every consumer. The stores share a backend but no state.
pub struct Session<P: KeyValueStore + Clone> {
    pub cart: CartStore<P>,
    pub wishlist: WishlistStore<P>,
    pub compare: CompareStore<P>,
}

impl<P: KeyValueStore + Clone> Session<P> {
    /// Opens every store, hydrating each from `storage`.
    #[tracing::instrument(skip(storage))]
    pub fn open(storage: P) -> Self {
        Self {
            cart: Store::<Cart, P>::open(storage.clone()),
            wishlist: Store::<Wishlist, P>::open(storage.clone()),
            compare: Store::<Compare, P>::open(storage),
        }
    }
}
