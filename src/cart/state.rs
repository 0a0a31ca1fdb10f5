//! Cart state: ordered line items, one per product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::mvi::State;

use super::product::{ProductId, ProductSnapshot};

/// One cart entry: a product snapshot and how many of it.
///
/// Persisted flat, product fields next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Unit price times quantity. Always derived, never stored.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// The whole cart.
///
/// Invariants, upheld by every constructor including deserialization:
/// - at most one line item per product id
/// - every quantity is at least 1
/// - every product has a non-empty id and non-negative prices
///
/// Insertion order is kept for display only.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl State for CartState {}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from arbitrary line items, merging duplicates and
    /// dropping empty lines.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self {
            items: normalize(items),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.product.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    pub(super) fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}

impl From<Vec<LineItem>> for CartState {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

fn normalize(items: Vec<LineItem>) -> Vec<LineItem> {
    let incoming = items.len();
    let mut merged: Vec<LineItem> = Vec::with_capacity(incoming);

    for item in items {
        if item.quantity == 0 || !item.product.is_valid() {
            continue;
        }
        match merged
            .iter_mut()
            .find(|existing| existing.product.id == item.product.id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }

    if merged.len() != incoming {
        tracing::debug!(
            incoming,
            kept = merged.len(),
            "Normalized cart line items"
        );
    }
    merged
}
