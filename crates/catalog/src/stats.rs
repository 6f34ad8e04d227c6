//! Inventory statistics for the admin dashboard.

use chrono::{DateTime, Utc};
use common::{Money, Product};
use serde::Serialize;

/// Products with fewer units than this count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Aggregate inventory figures at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,

    /// Products below [`LOW_STOCK_THRESHOLD`], out-of-stock ones included.
    pub low_stock_products: usize,

    pub out_of_stock_products: usize,

    /// Sum of `price * inventory`.
    pub total_inventory_value: Money,

    /// The low-stock products, in catalog order.
    pub low_stock_items: Vec<Product>,

    pub generated_at: DateTime<Utc>,
}

impl InventoryStats {
    /// Computes the statistics for `products`.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut stats = Self {
            total_products: 0,
            low_stock_products: 0,
            out_of_stock_products: 0,
            total_inventory_value: Money::zero(),
            low_stock_items: Vec::new(),
            generated_at: Utc::now(),
        };

        for product in products {
            stats.total_products += 1;
            stats.total_inventory_value += product.price.multiply(product.inventory);
            if product.inventory == 0 {
                stats.out_of_stock_products += 1;
            }
            if product.inventory < LOW_STOCK_THRESHOLD {
                stats.low_stock_products += 1;
                stats.low_stock_items.push(product.clone());
            }
        }
        stats
    }
}
