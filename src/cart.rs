//! Cart

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised when a list of lines would break the cart's invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line has no units.
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// The same product appears on more than one line.
    #[error("product {0} appears on more than one line")]
    DuplicateProduct(ProductId),
}

/// One product's presence in the cart.
///
/// Serialised with the price in pounds, as the storefront stores it.
///
/// Name, price and image are a snapshot taken when the product was first added; they are not
/// refreshed from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    product_id: ProductId,

    name: String,

    #[serde(rename = "price", with = "crate::pricing::as_pounds")]
    unit_price: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    quantity: u32,
}

impl CartLine {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Product this line refers to
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name at add-time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price in piastres at add-time
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Image reference at add-time
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Number of units, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Shopping cart: lines in insertion order, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line has zero quantity or a product appears twice.
    pub fn from_lines(lines: impl Into<Vec<CartLine>>) -> Result<Self, CartError> {
        let lines = lines.into();

        for (i, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.product_id.clone()));
            }

            if lines
                .iter()
                .skip(i + 1)
                .any(|other| other.product_id == line.product_id)
            {
                return Err(CartError::DuplicateProduct(line.product_id.clone()));
            }
        }

        Ok(Self { lines })
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line for the product, otherwise appends a new line. Adding zero
    /// units changes nothing and returns `None`.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Option<&CartLine> {
        if quantity == 0 {
            return None;
        }

        let index = match self.position(&product.id) {
            Some(index) => {
                let line = self.lines.get_mut(index)?;
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.lines.push(CartLine::snapshot(product, quantity));
                self.lines.len() - 1
            }
        };

        self.lines.get(index)
    }

    /// Remove the line for a product, returning it if present.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.position(product_id)?;

        Some(self.lines.remove(index))
    }

    /// Overwrite a line's quantity. A quantity of zero or less removes the line.
    ///
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id).is_some();
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            Some(_) | None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product_id == product_id)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
