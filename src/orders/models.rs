//! Order Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, CartLine},
    checkout::CustomerInfo,
    pricing::{self, PricingError},
};

/// Brand prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "KLD";

/// Order identifier, `KLD-<unix milliseconds>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Id for an order placed at `timestamp`.
    pub fn at(timestamp: Timestamp) -> Self {
        Self(format!("{ORDER_ID_PREFIX}-{}", timestamp.as_millisecond()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet worked on
    #[default]
    Placed,
    /// Being prepared
    Processing,
    /// Handed to the courier
    Shipped,
    /// Delivered to the customer
    Delivered,
    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Label shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Placed => "تم استلام الطلب",
            Self::Processing => "قيد التجهيز",
            Self::Shipped => "تم الشحن",
            Self::Delivered => "تم التوصيل",
            Self::Cancelled => "ملغي",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    Cod,
    /// Card payment
    Stripe,
}

impl PaymentMethod {
    /// Label shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cod => "الدفع عند الاستلام (COD)",
            Self::Stripe => "الدفع بالبطاقة",
        }
    }
}

/// An order as handed to the order store. Immutable once built.
///
/// `total` and line prices are held in piastres and written out in pounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    id: OrderId,
    items: Vec<CartLine>,
    #[serde(with = "crate::pricing::as_pounds")]
    total: u64,
    customer_info: CustomerInfo,
    status: OrderStatus,
    payment_method: PaymentMethod,
    created_at: Timestamp,
}

impl OrderRecord {
    /// Snapshot the cart into a new cash-on-delivery order.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the cart total overflows.
    pub fn place(
        id: OrderId,
        cart: &Cart,
        customer_info: CustomerInfo,
        created_at: Timestamp,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            id,
            total: pricing::subtotal_minor(cart.lines())?,
            items: cart.lines().to_vec(),
            customer_info,
            status: OrderStatus::Placed,
            payment_method: PaymentMethod::Cod,
            created_at,
        })
    }

    /// Order id
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Lines as they were in the cart at submission
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Total in piastres
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Total as money.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the total does not fit the money representation.
    pub fn total_money(&self) -> Result<Money<'static, Currency>, PricingError> {
        pricing::money(self.total)
    }

    /// Delivery and contact details
    pub fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    /// Status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// When the order was placed
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
