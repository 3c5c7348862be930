//! Kledje
//!
//! Cart, pricing and checkout core for the Kledje storefront: a persistent shopping cart,
//! derived totals, checkout form validation and an order submission pipeline that hands
//! orders to an external order store.

pub mod cart;
pub mod checkout;
pub mod clock;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod storage;
pub mod submission;
