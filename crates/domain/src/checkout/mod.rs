//! Checkout pricing and the simulated order flow.

mod payment;
mod service;
mod summary;

pub use payment::{DEFAULT_PAYMENT_DELAY, PaymentProcessor, PaymentReceipt, SimulatedPayment};
pub use service::{
    Checkout, ORDER_NUMBER_LEN, OrderConfirmation, ShippingDetails, generate_order_number,
};
pub use summary::{CheckoutSummary, TAX_RATE_BASIS_POINTS};

use thiserror::Error;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required shipping field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The payment processor declined the charge.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}
