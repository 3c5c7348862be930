//! Orders
//!
//! Order records and the external store they are handed to at checkout.

pub mod models;
pub mod rest;
pub mod store;

pub use models::{OrderId, OrderRecord, OrderStatus, PaymentMethod};
pub use rest::{RestOrderStore, RestOrderStoreConfig};
pub use store::{MemoryOrderStore, MockOrderStore, OrderStore, OrderStoreError};
