//! Checkout flow: validate, pay, clear the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::KeyValueStore;
use uuid::Uuid;

use crate::cart::{CartItem, CartStore};

use super::{CheckoutError, CheckoutSummary, PaymentProcessor};

/// Length of a customer-facing order number.
pub const ORDER_NUMBER_LEN: usize = 9;

/// Contact and shipping fields collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingDetails {
    /// Returns the first required field that is blank.
    fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("email", &self.email),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Confirmation returned once an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Customer-facing order number.
    pub order_number: String,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,

    /// The items that were ordered.
    pub items: Vec<CartItem>,

    /// Pricing at the time the order was placed.
    pub summary: CheckoutSummary,

    /// Payment processor reference.
    pub payment_reference: String,

    pub shipping: ShippingDetails,
}

/// Runs the checkout flow against a cart store.
pub struct Checkout<Pay: PaymentProcessor> {
    payment: Pay,
}

impl<Pay: PaymentProcessor> Checkout<Pay> {
    /// Creates a checkout that charges through `payment`.
    pub fn new(payment: Pay) -> Self {
        Self { payment }
    }

    /// Places an order for the cart's current contents.
    ///
    /// The cart is cleared only after payment is approved; on any error it is
    /// left untouched.
    #[tracing::instrument(skip_all, fields(items = cart.total_items()))]
    pub async fn place_order<P: KeyValueStore>(
        &self,
        cart: &mut CartStore<P>,
        shipping: ShippingDetails,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.state().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if let Some(field) = shipping.first_missing_field() {
            return Err(CheckoutError::MissingField(field));
        }

        let ordered = cart.snapshot();
        let summary = CheckoutSummary::for_cart(&ordered);

        let receipt = self.payment.authorize(summary.total).await?;
        cart.clear_cart();

        let confirmation = OrderConfirmation {
            order_number: generate_order_number(),
            placed_at: Utc::now(),
            items: ordered.items().to_vec(),
            summary,
            payment_reference: receipt.reference,
            shipping,
        };

        metrics::counter!("checkout_orders_total").increment(1);
        tracing::info!(
            order_number = %confirmation.order_number,
            total = %confirmation.summary.total,
            "order placed"
        );
        Ok(confirmation)
    }
}

/// Generates a 9-character upper-case alphanumeric order number.
pub fn generate_order_number() -> String {
    const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut value = Uuid::new_v4().as_u128();
    let mut number = String::with_capacity(ORDER_NUMBER_LEN);
    for _ in 0..ORDER_NUMBER_LEN {
        number.push(char::from(ALPHABET[(value % 36) as usize]));
        value /= 36;
    }
    number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_format() {
        for _ in 0..50 {
            let number = generate_order_number();
            assert_eq!(number.len(), ORDER_NUMBER_LEN);
            assert!(
                number
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            );
        }
    }

    #[test]
    fn missing_field_reports_first_blank() {
        let details = ShippingDetails {
            email: "a@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(details.first_missing_field(), Some("lastName"));
    }
}
