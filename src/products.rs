//! Products

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize, Serializer};

/// Opaque catalogue identifier, used as the cart's merge key.
///
/// Catalogue ids may be JSON strings or integers. Both compare by their text, so `1` and `"1"`
/// name the same product, and an integer id is written back as an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "WireId")]
pub struct ProductId {
    text: String,
    number: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            number: None,
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number {
            Some(number) => serializer.serialize_u64(number),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl From<WireId> for ProductId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(number) => Self::from(number),
            WireId::Text(text) => Self::new(text),
        }
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.text)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self {
            text: value.to_string(),
            number: Some(value),
        }
    }
}

/// Product as offered to the cart by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in piastres
    pub price: u64,

    /// Image reference
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
