//! Order submission
//!
//! [`Checkout`] turns the session's cart and a checkout form into an [`OrderRecord`] and hands
//! it to an [`OrderStore`]:
//!
//! ```text
//! Idle ─▶ Validating ─▶ Submitting ─▶ Succeeded
//!  ▲           │             │
//!  └ empty     └──▶ Failed ◀─┘
//! ```
//!
//! Nothing is retried. A failed submission leaves the cart as it was so the caller can submit
//! again.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    checkout::{self, CustomerInfo, ValidationError},
    clock::{Clock, SystemClock},
    orders::{OrderId, OrderRecord, OrderStore, OrderStoreError},
    pricing::PricingError,
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};

/// How long the order store is given to accept an order.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where a checkout currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Checking the form
    Validating,
    /// Waiting for the order store
    Submitting,
    /// The order store accepted the order
    Succeeded(OrderId),
    /// The last attempt failed
    Failed,
}

/// Failures while handing the order to the store.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The store refused the order or could not be reached.
    #[error(transparent)]
    Store(#[from] OrderStoreError),

    /// The store did not answer in time.
    #[error("order store did not answer within {0:?}")]
    Timeout(Duration),
}

impl SubmissionError {
    /// Description of the failure for display to the shopper.
    pub fn message(&self) -> String {
        match self {
            Self::Store(error) => error.message(),
            Self::Timeout(_) => self.to_string(),
        }
    }
}

/// Reasons a checkout did not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The checkout form is incomplete or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cart total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order store did not accept the order.
    #[error("order submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

impl CheckoutError {
    /// Message shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "لا يمكن إتمام طلب فارغ".to_string(),
            Self::Validation(error) => error.user_message().to_string(),
            Self::Pricing(_) => "تعذر حساب إجمالي الطلب".to_string(),
            Self::Submission(error) => error.message(),
        }
    }
}

/// Order submission pipeline.
#[derive(Debug)]
pub struct Checkout<St, C = SystemClock> {
    store: St,
    clock: C,
    timeout: Duration,
    state: SubmissionState,
}

impl<St: OrderStore> Checkout<St> {
    /// Create a pipeline submitting to `store`.
    pub fn new(store: St) -> Self {
        Self {
            store,
            clock: SystemClock,
            timeout: DEFAULT_SUBMIT_TIMEOUT,
            state: SubmissionState::Idle,
        }
    }
}

impl<St: OrderStore, C: Clock> Checkout<St, C> {
    /// Use `clock` for order ids and timestamps.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Checkout<St, C2> {
        Checkout {
            store: self.store,
            clock,
            timeout: self.timeout,
            state: self.state,
        }
    }

    /// Bound each store call by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Order store.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Store call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Place an order for the session's cart.
    ///
    /// On success the cart is emptied and the new order's id returned. Must be called within a
    /// tokio runtime with the time driver enabled.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart is empty; the store is not contacted.
    /// - [`CheckoutError::Validation`]: the form is invalid; the store is not contacted.
    /// - [`CheckoutError::Pricing`]: the cart total overflows.
    /// - [`CheckoutError::Submission`]: the store refused the order or timed out; the cart is
    ///   left untouched.
    pub async fn submit<S, O>(
        &mut self,
        session: &mut CartSession<S, O>,
        customer: &CustomerInfo,
    ) -> Result<OrderId, CheckoutError>
    where
        S: KeyValueStorage,
        O: CartObserver,
    {
        if session.cart().is_empty() {
            self.state = SubmissionState::Idle;
            return Err(CheckoutError::EmptyCart);
        }

        self.state = SubmissionState::Validating;

        let customer = checkout::validate(customer).map_err(|error| self.fail(error))?;

        let created_at = self.clock.now();
        let id = OrderId::at(created_at);

        let order = OrderRecord::place(id.clone(), session.cart(), customer, created_at)
            .map_err(|error| self.fail(error))?;

        self.state = SubmissionState::Submitting;

        info!(
            order = %id,
            total = order.total(),
            lines = order.items().len(),
            "submitting order"
        );

        let result = match tokio::time::timeout(self.timeout, self.store.insert(&order)).await {
            Ok(result) => result.map_err(SubmissionError::Store),
            Err(_elapsed) => Err(SubmissionError::Timeout(self.timeout)),
        };

        if let Err(error) = result {
            warn!(order = %id, %error, "order submission failed");
            return Err(self.fail(error));
        }

        if let Err(error) = session.clear() {
            warn!(order = %id, %error, "order placed but the emptied cart could not be saved");
        }

        info!(order = %id, "order placed");

        self.state = SubmissionState::Succeeded(id.clone());

        Ok(id)
    }

    fn fail(&mut self, error: impl Into<CheckoutError>) -> CheckoutError {
        self.state = SubmissionState::Failed;
        error.into()
    }
}
