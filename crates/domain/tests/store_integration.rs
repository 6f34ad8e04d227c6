//! Integration tests for the cart, wishlist and comparison stores.
//!
//! These tests drive the stores through their public operations and verify
//! persistence, hydration and the checkout flow end to end.

use async_trait::async_trait;
use chrono::Utc;
use common::{Money, Product, ProductId};
use domain::{
    CART_STORAGE_KEY, COMPARE_STORAGE_KEY, CartStore, Checkout, CheckoutError, CompareStore,
    MAX_COMPARE_ITEMS, PaymentProcessor, PaymentReceipt, Session, ShippingDetails,
    SimulatedPayment, Store, WISHLIST_STORAGE_KEY, WishlistStore,
};
use storage::{BackgroundStorage, FileStorage, InMemoryStorage, KeyValueStore, Snapshot};

fn product(id: &str, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Watch {id}"),
        slug: format!("watch-{}", id.to_lowercase()),
        description: "Automatic movement".to_string(),
        price: Money::from_cents(price_cents),
        original_price: None,
        category: "Luxury".to_string(),
        inventory: 25,
        image: "/images/watch1.jpg".to_string(),
        last_updated: Utc::now(),
    }
}

fn cart_store() -> (CartStore<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    (Store::open(storage.clone()), storage)
}

fn wishlist_store() -> (WishlistStore<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    (Store::open(storage.clone()), storage)
}

mod cart {
    use super::*;

    #[test]
    fn repeated_adds_sum_into_one_entry() {
        let (mut cart, _) = cart_store();

        cart.add_to_cart(product("A", 1000), 2);
        cart.add_to_cart(product("A", 1000), 3);

        assert_eq!(cart.state().len(), 1);
        assert_eq!(cart.state().get(&"A".into()).unwrap().quantity, 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn quantity_sum_holds_for_any_add_sequence() {
        let sequences: [&[u32]; 4] = [&[1], &[1, 1, 1], &[4, 0, 9], &[7, 2, 3, 10, 1]];

        for quantities in sequences {
            let (mut cart, _) = cart_store();
            for quantity in quantities {
                cart.add_to_cart(product("A", 500), *quantity);
            }
            let expected: u32 = quantities.iter().sum();
            assert_eq!(cart.state().len(), 1);
            assert_eq!(cart.state().get(&"A".into()).unwrap().quantity, expected);
        }
    }

    #[test]
    fn update_to_zero_or_negative_removes_entry() {
        for quantity in [0, -3] {
            let (mut cart, _) = cart_store();
            cart.add_to_cart(product("A", 1000), 2);

            cart.update_quantity(&"A".into(), quantity);

            assert!(!cart.is_in_cart(&"A".into()));
            assert_eq!(cart.total_items(), 0);
        }
    }

    #[test]
    fn totals_match_items() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 1000), 2);
        cart.add_to_cart(product("B", 2500), 1);

        let quantity_sum: u64 = cart
            .state()
            .items()
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        assert_eq!(cart.total_items(), quantity_sum);
        assert_eq!(cart.total_price(), Money::from_cents(4500));
    }

    #[test]
    fn removing_absent_product_leaves_state_and_storage_alone() {
        let (mut cart, storage) = cart_store();
        cart.add_to_cart(product("A", 1000), 2);
        cart.add_to_cart(product("B", 2500), 1);
        let before = cart.snapshot();
        let writes = storage.write_count();

        cart.remove_from_cart(&"missing".into());

        assert_eq!(*cart.state(), *before);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn every_change_is_persisted() {
        let (mut cart, storage) = cart_store();

        cart.add_to_cart(product("A", 1000), 1);
        cart.update_quantity(&"A".into(), 4);
        cart.remove_from_cart(&"A".into());

        assert_eq!(storage.write_count(), 3);
        let raw = storage.get(CART_STORAGE_KEY).unwrap();
        let snapshot: Snapshot<Vec<domain::CartItem>> = Snapshot::decode(&raw).unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn extreme_quantities_keep_totals_defined() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 3_000_000), 1);
        cart.update_quantity(&"A".into(), i64::MAX);

        let summary = domain::CheckoutSummary::for_cart(cart.state());
        assert_eq!(summary.item_count, u64::from(u32::MAX));
        assert!(summary.total > summary.subtotal);

        cart.add_to_cart(product("B", 3_000_000_000), u32::MAX);
        assert_eq!(cart.total_price(), Money::from_cents(i64::MAX));
        assert_eq!(
            domain::CheckoutSummary::for_cart(cart.state()).total,
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn clear_cart_empties_everything() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 1000), 1);
        cart.add_to_cart(product("B", 1000), 1);

        cart.clear_cart();

        assert!(cart.state().is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }
}

mod wishlist {
    use super::*;

    #[test]
    fn duplicate_add_keeps_single_entry_and_first_timestamp() {
        let (mut wishlist, storage) = wishlist_store();

        wishlist.add_to_wishlist(product("B", 1000));
        let first_added = wishlist.state().get(&"B".into()).unwrap().added_at;
        wishlist.add_to_wishlist(product("B", 1000));

        assert_eq!(wishlist.total_items(), 1);
        assert_eq!(
            wishlist.state().get(&"B".into()).unwrap().added_at,
            first_added
        );
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn total_items_counts_entries() {
        let (mut wishlist, _) = wishlist_store();
        wishlist.add_to_wishlist(product("A", 1000));
        wishlist.add_to_wishlist(product("B", 1000));
        wishlist.add_to_wishlist(product("C", 1000));
        wishlist.remove_from_wishlist(&"B".into());

        assert_eq!(wishlist.total_items(), 2);
        assert!(!wishlist.is_in_wishlist(&"B".into()));
    }

    #[test]
    fn clear_wishlist() {
        let (mut wishlist, _) = wishlist_store();
        wishlist.add_to_wishlist(product("A", 1000));
        wishlist.clear_wishlist();
        assert_eq!(wishlist.total_items(), 0);
    }
}

mod compare {
    use super::*;

    fn compare_store() -> (CompareStore<InMemoryStorage>, InMemoryStorage) {
        let storage = InMemoryStorage::new();
        (Store::open(storage.clone()), storage)
    }

    #[test]
    fn holds_at_most_four_products() {
        let (mut compare, storage) = compare_store();

        for id in ["A", "B", "C", "D"] {
            assert!(compare.add_to_compare(product(id, 1000)));
        }
        assert!(compare.is_compare_full());
        assert!(!compare.add_to_compare(product("E", 1000)));

        assert_eq!(compare.total_items(), MAX_COMPARE_ITEMS);
        assert!(!compare.is_in_compare(&"E".into()));
        assert_eq!(storage.write_count(), 4);
    }

    #[test]
    fn duplicates_are_ignored() {
        let (mut compare, storage) = compare_store();

        assert!(compare.add_to_compare(product("A", 1000)));
        assert!(!compare.add_to_compare(product("A", 1000)));

        assert_eq!(compare.total_items(), 1);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn remove_and_clear_are_persisted() {
        let (mut compare, storage) = compare_store();
        compare.add_to_compare(product("A", 1000));
        compare.add_to_compare(product("B", 1000));

        compare.remove_from_compare(&"A".into());
        let raw = storage.get(COMPARE_STORAGE_KEY).unwrap();
        let snapshot: Snapshot<Vec<Product>> = Snapshot::decode(&raw).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, ProductId::new("B"));

        compare.clear_compare();
        compare.clear_compare();
        assert_eq!(storage.write_count(), 4);
        assert_eq!(compare.total_items(), 0);
    }
}

mod hydration {
    use super::*;

    #[test]
    fn cart_round_trips_through_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        let mut cart: CartStore<_> = Store::open(storage.clone());
        cart.add_to_cart(product("A", 1000), 2);
        cart.add_to_cart(product("B", 2500), 1);
        cart.add_to_cart(product("C", 300), 7);
        cart.update_quantity(&"B".into(), 3);

        let reopened: CartStore<_> = Store::open(storage);
        assert_eq!(*reopened.state(), *cart.state());
    }

    #[test]
    fn wishlist_round_trips_with_timestamps() {
        let storage = InMemoryStorage::new();
        let mut wishlist: WishlistStore<_> = Store::open(storage.clone());
        wishlist.add_to_wishlist(product("A", 1000));
        wishlist.add_to_wishlist(product("B", 1000));

        let reopened: WishlistStore<_> = Store::open(storage);
        assert_eq!(*reopened.state(), *wishlist.state());
    }

    #[test]
    fn compare_round_trips_through_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        let mut compare: CompareStore<_> = Store::open(storage.clone());
        compare.add_to_compare(product("C", 1000));
        compare.add_to_compare(product("A", 2500));

        let reopened: CompareStore<_> = Store::open(storage);
        assert_eq!(*reopened.state(), *compare.state());
    }

    #[test]
    fn oversized_compare_snapshot_is_capped() {
        let items: Vec<Product> = ["A", "B", "A", "C", "D", "E", "F"]
            .into_iter()
            .map(|id| product(id, 1000))
            .collect();
        let raw = Snapshot::new(items).encode().unwrap();
        let storage = InMemoryStorage::with_entry(COMPARE_STORAGE_KEY, raw);

        let compare: CompareStore<_> = Store::open(storage);

        let ids: Vec<_> = compare.state().items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn malformed_snapshots_hydrate_empty() {
        let cases = [
            "",
            "not json",
            "[]",
            r#"{"schema":1,"saved_at":"2024-01-01T00:00:00Z","items":"oops"}"#,
            r#"{"schema":2,"saved_at":"2024-01-01T00:00:00Z","items":[]}"#,
        ];

        for raw in cases {
            let storage = InMemoryStorage::with_entry(CART_STORAGE_KEY, raw);
            storage
                .save(WISHLIST_STORAGE_KEY, raw)
                .expect("in-memory save");
            storage
                .save(COMPARE_STORAGE_KEY, raw)
                .expect("in-memory save");

            let session = Session::open(storage);
            assert!(session.cart.state().is_empty(), "cart from {raw:?}");
            assert!(session.wishlist.state().is_empty(), "wishlist from {raw:?}");
            assert!(session.compare.state().is_empty(), "compare from {raw:?}");
        }
    }

    #[tokio::test]
    async fn background_writes_reach_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStorage::open(dir.path()).unwrap();
        let storage = BackgroundStorage::spawn(files.clone()).unwrap();

        let mut session = Session::open(storage.clone());
        session.cart.add_to_cart(product("A", 1000), 2);
        session.wishlist.add_to_wishlist(product("B", 2500));
        session.cart.update_quantity(&"A".into(), 5);
        storage.flush().await.unwrap();

        let reopened = Session::open(files);
        assert_eq!(reopened.cart.total_items(), 5);
        assert!(reopened.wishlist.is_in_wishlist(&"B".into()));
    }

    #[test]
    fn absent_snapshot_hydrates_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let session = Session::open(storage);
        assert!(session.cart.state().is_empty());
        assert!(session.wishlist.state().is_empty());
        assert!(session.compare.state().is_empty());
    }
}

mod checkout {
    use std::time::Duration;

    use super::*;

    struct DecliningPayment;

    #[async_trait]
    impl PaymentProcessor for DecliningPayment {
        async fn authorize(&self, _amount: Money) -> Result<PaymentReceipt, CheckoutError> {
            Err(CheckoutError::PaymentDeclined("card declined".to_string()))
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "10001".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn place_order_clears_cart_and_returns_confirmation() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 1000), 2);
        cart.add_to_cart(product("B", 2500), 1);

        let checkout = Checkout::new(SimulatedPayment::with_delay(Duration::from_secs(3)));
        let confirmation = checkout.place_order(&mut cart, shipping()).await.unwrap();

        assert_eq!(confirmation.order_number.len(), 9);
        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.summary.subtotal, Money::from_cents(4500));
        assert_eq!(confirmation.summary.total, Money::from_cents(4860));
        assert!(confirmation.payment_reference.starts_with("SIM-"));
        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let (mut cart, _) = cart_store();
        let checkout = Checkout::new(SimulatedPayment::with_delay(Duration::ZERO));

        let result = checkout.place_order(&mut cart, shipping()).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn blank_shipping_field_is_rejected() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 1000), 1);
        let checkout = Checkout::new(SimulatedPayment::with_delay(Duration::ZERO));

        let mut details = shipping();
        details.zip_code = String::new();
        let result = checkout.place_order(&mut cart, details).await;

        assert!(matches!(result, Err(CheckoutError::MissingField("zipCode"))));
        assert!(cart.is_in_cart(&"A".into()));
    }

    #[tokio::test]
    async fn declined_payment_keeps_cart() {
        let (mut cart, _) = cart_store();
        cart.add_to_cart(product("A", 1000), 1);

        let result = Checkout::new(DecliningPayment)
            .place_order(&mut cart, shipping())
            .await;

        assert!(matches!(result, Err(CheckoutError::PaymentDeclined(_))));
        assert_eq!(cart.total_items(), 1);
    }
}
