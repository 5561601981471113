//! Payment gateway seam.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use thali::prices::Price;
use thiserror::Error;
use tracing::info;

/// Errors reported by the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The charge was not accepted.
    #[error("payment was not accepted: {0}")]
    Rejected(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the buyer the given amount.
    async fn charge(&self, amount: Price) -> Result<(), PaymentError>;
}

/// Stand-in gateway: waits the configured delay, then accepts the charge.
///
/// There is no real payment processing behind checkout; this models the
/// observed delay so the commit sequencing around it stays honest.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, amount: Price) -> Result<(), PaymentError> {
        tokio::time::sleep(self.delay).await;

        info!(amount = %amount, "simulated payment accepted");

        Ok(())
    }
}
