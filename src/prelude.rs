//! Kledje prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    checkout::{CustomerInfo, EGYPTIAN_CITIES, Field, ValidationError, validate},
    clock::{Clock, FixedClock, SystemClock},
    orders::{
        MemoryOrderStore, OrderId, OrderRecord, OrderStatus, OrderStore, OrderStoreError,
        PaymentMethod, RestOrderStore, RestOrderStoreConfig,
    },
    pricing::{CartSummary, PricingError, Shipping, Tax, format_price},
    products::{Product, ProductId},
    session::{CartEvent, CartObserver, CartSession, TracingObserver},
    storage::{CartStore, FileStorage, KeyValueStorage, MemoryStorage, StorageError},
    submission::{Checkout, CheckoutError, SubmissionError, SubmissionState},
};
