//! Pricing

use std::num::TryFromIntError;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Price arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// Amount does not fit in the money representation.
    #[error("amount out of range")]
    OutOfRange(#[from] TryFromIntError),

    /// Amount is negative or otherwise cannot be a price.
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),
}

/// The storefront's currency.
pub fn currency() -> &'static Currency {
    iso::EGP
}

/// Wraps an amount of piastres as money in the storefront currency.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the amount does not fit a signed 64-bit value.
pub fn money(minor: u64) -> Result<Money<'static, Currency>, PricingError> {
    Ok(Money::from_minor(i64::try_from(minor)?, currency()))
}

/// Converts an amount in pounds (e.g. `149.99`) to piastres, rounding to the nearest piastre.
///
/// # Errors
///
/// Returns [`PricingError::InvalidAmount`] for negative or unrepresentable amounts.
pub fn minor_units(amount: Decimal) -> Result<u64, PricingError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round())
        .and_then(|minor| minor.to_u64())
        .ok_or(PricingError::InvalidAmount(amount))
}

/// Price of a single line, in piastres.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the line total overflows.
pub fn line_total(line: &CartLine) -> Result<u64, PricingError> {
    line.unit_price()
        .checked_mul(u64::from(line.quantity()))
        .ok_or(PricingError::Overflow)
}

/// Sum of `unit_price * quantity` over the lines, in piastres.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum overflows.
pub fn subtotal_minor(lines: &[CartLine]) -> Result<u64, PricingError> {
    lines.iter().try_fold(0_u64, |acc, line| {
        acc.checked_add(line_total(line)?)
            .ok_or(PricingError::Overflow)
    })
}

/// Calculates the subtotal of the cart. The empty cart costs nothing.
///
/// # Errors
///
/// Returns a `PricingError` if the total overflows.
pub fn subtotal(cart: &Cart) -> Result<Money<'static, Currency>, PricingError> {
    money(subtotal_minor(cart.lines())?)
}

/// Number of units in the cart, for the cart badge.
pub fn item_count(cart: &Cart) -> u64 {
    cart.lines()
        .iter()
        .map(|line| u64::from(line.quantity()))
        .sum()
}

/// Shipping charge shown at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shipping {
    /// No shipping charge.
    Free,
}

impl Shipping {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "مجاني",
        }
    }
}

/// Tax treatment shown at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tax {
    /// Prices already include tax.
    IncludedInPrice,
}

impl Tax {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::IncludedInPrice => "محتسبة في السعر",
        }
    }
}

/// Order summary as shown next to the cart and checkout form.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Sum of all line totals
    pub subtotal: Money<'static, Currency>,

    /// Shipping charge
    pub shipping: Shipping,

    /// Tax treatment
    pub tax: Tax,

    /// Amount due on delivery
    pub total: Money<'static, Currency>,

    /// Number of units
    pub item_count: u64,
}

impl CartSummary {
    /// Summarise the cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the subtotal overflows.
    pub fn of(cart: &Cart) -> Result<Self, PricingError> {
        let subtotal = subtotal(cart)?;

        Ok(Self {
            subtotal,
            shipping: Shipping::Free,
            tax: Tax::IncludedInPrice,
            total: subtotal,
            item_count: item_count(cart),
        })
    }
}

/// Converts piastres to pounds, e.g. `14_999` to `149.99`.
pub fn pounds(minor: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(minor), 2)
}

/// Serde adapter writing a piastre amount as a JSON number of pounds.
///
/// The stored cart and the order table both hold prices in pounds, e.g. `149.99`.
pub(crate) mod as_pounds {
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer, de::Error as _};

    use super::{minor_units, pounds};

    pub(crate) fn serialize<S: Serializer>(minor: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&pounds(*minor), serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let amount: Decimal = rust_decimal::serde::float::deserialize(deserializer)?;

        minor_units(amount).map_err(D::Error::custom)
    }
}

/// Formats money for display: at most two fraction digits, trailing zeros dropped.
pub fn format_price(money: &Money<'_, Currency>) -> String {
    format!("{} ج.م", money.amount().round_dp(2).normalize())
}
