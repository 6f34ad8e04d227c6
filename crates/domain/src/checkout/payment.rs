//! Simulated payment processing.

use std::time::Duration;

use async_trait::async_trait;
use common::Money;
use uuid::Uuid;

use super::CheckoutError;

/// Default time a simulated payment takes to approve.
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(3);

/// Result of an approved payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Reference assigned by the payment processor.
    pub reference: String,

    /// Amount that was approved.
    pub amount: Money,
}

/// Trait for payment processing during checkout.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Authorizes a charge for `amount`.
    async fn authorize(&self, amount: Money) -> Result<PaymentReceipt, CheckoutError>;
}

/// Payment processor that waits a fixed delay and always approves.
///
/// No card data is taken or checked.
#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    delay: Duration,
}

impl SimulatedPayment {
    /// Creates a simulator with the default delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_PAYMENT_DELAY)
    }

    /// Creates a simulator with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPayment {
    async fn authorize(&self, amount: Money) -> Result<PaymentReceipt, CheckoutError> {
        tokio::time::sleep(self.delay).await;

        let reference = format!("SIM-{}", Uuid::new_v4().simple());
        tracing::debug!(%reference, %amount, "simulated payment approved");
        Ok(PaymentReceipt { reference, amount })
    }
}
