//! # Payment Gateway
//!
//! Orders ask a [`PaymentGateway`] for a payment intent before they are persisted. Only the
//! deterministic [`StubGateway`] ships with this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
    pub amount: u64,
    pub currency: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment intent rejected: {0}")]
    Rejected(String),
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment intent for `amount` cents in `currency`.
    async fn create_intent(&self, amount: u64, currency: &str)
        -> Result<PaymentIntent, PaymentError>;
}

/// Hands out `fake_cs_1`, `fake_cs_2`, ... and never fails.
#[derive(Debug, Default)]
pub struct StubGateway {
    issued: AtomicU64,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    #[instrument(skip(self))]
    async fn create_intent(
        &self,
        amount: u64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(n, "Issuing stub payment intent");
        Ok(PaymentIntent {
            client_secret: format!("fake_cs_{n}"),
            amount,
            currency: currency.to_string(),
        })
    }
}
