//! Product snapshots copied into the cart at add time.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique catalog identifier of a product.
///
/// Deserializing a blank string is rejected so a persisted cart can never
/// hold an anonymous line item. [`ProductId::new`] and `From<&str>` stay
/// infallible for code paths; a blank id built that way reports
/// [`ProductId::is_blank`] and the cart refuses to hold it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl TryFrom<String> for ProductId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let id = Self(value);
        if id.is_blank() {
            return Err("product id must not be empty".to_string());
        }
        Ok(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Catalog fields captured when a product is added to the cart.
///
/// The cart owns this copy. Later catalog price changes do not reach it,
/// so line totals stay what the shopper saw when they clicked "Add".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Accepts the `_id` spelling used by document-store backends.
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub title: String,
    /// Unit price. Never negative when read from text.
    #[serde(deserialize_with = "non_negative")]
    pub price: Decimal,
    /// List price before discount, if the catalog shows one.
    #[serde(
        default,
        deserialize_with = "non_negative_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    /// Thumbnail reference (URL or asset key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    if amount < Decimal::ZERO {
        return Err(D::Error::custom(format!("price {amount} must not be negative")));
    }
    Ok(amount)
}

fn non_negative_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    non_negative(deserializer).map(Some)
}

impl ProductSnapshot {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            original_price: None,
            image: None,
            in_stock: true,
        }
    }

    pub fn with_original_price(mut self, original_price: Decimal) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Whether the cart may hold this snapshot: a non-blank id and
    /// non-negative prices. Catches snapshots built in code, which skip the
    /// checks applied when reading text.
    pub fn is_valid(&self) -> bool {
        !self.id.is_blank()
            && self.price >= Decimal::ZERO
            && self.original_price.map_or(true, |p| p >= Decimal::ZERO)
    }

    /// Per-unit saving against the list price, when the list price is higher.
    pub fn savings(&self) -> Option<Decimal> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}
