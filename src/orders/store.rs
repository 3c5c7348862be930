//! Order store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::orders::models::OrderRecord;

/// Errors returned by an order store.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered but refused the order.
    #[error("order store rejected the order with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message returned by the store
        message: String,
    },

    /// The store could not be reached or used.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

impl OrderStoreError {
    /// The store's own description of the failure, for display to the shopper.
    pub fn message(&self) -> String {
        match self {
            Self::Http(error) => error.to_string(),
            Self::Rejected { message, .. } | Self::Unavailable(message) => message.clone(),
        }
    }
}

/// External system orders are handed to at checkout.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a newly placed order.
    async fn insert(&self, order: &OrderRecord) -> Result<(), OrderStoreError>;
}

/// Order store that keeps orders in memory.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<OrderRecord>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders inserted so far, oldest first.
    pub fn orders(&self) -> Vec<OrderRecord> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &OrderRecord) -> Result<(), OrderStoreError> {
        debug!(order = %order.id(), "storing order in memory");

        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::Cart,
        checkout::CustomerInfo,
        orders::models::OrderId,
        products::Product,
    };

    #[tokio::test]
    async fn memory_store_keeps_inserted_orders() -> TestResult {
        let store = MemoryOrderStore::new();
        let created_at = Timestamp::from_millisecond(1_700_000_000_000)?;
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "صابون", 3_000), 1);

        let order = OrderRecord::place(
            OrderId::at(created_at),
            &cart,
            CustomerInfo::default(),
            created_at,
        )?;

        store.insert(&order).await?;

        assert_eq!(store.orders(), [order]);

        Ok(())
    }

    #[test]
    fn message_returns_store_text() {
        let rejected = OrderStoreError::Rejected {
            status: 409,
            message: "duplicate key value".to_string(),
        };

        assert_eq!(rejected.message(), "duplicate key value");
        assert_eq!(
            OrderStoreError::Unavailable("offline".to_string()).message(),
            "offline"
        );
    }
}
