//! Checkout: turn a selection of cart lines into an order draft.
//!
//! The order/payment API lives elsewhere. This module only snapshots what
//! is being bought and, once the caller reports success, resets the cart.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::totals::selection_subtotal;
use crate::cart::{CartAction, CartState, DeliveryPolicy, LineItem, ProductId};
use crate::store::CartStore;

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("None of the selected products are in the cart")]
    EmptySelection,

    #[error("Products no longer in stock: {}", format_ids(.ids))]
    OutOfStock { ids: Vec<ProductId> },
}

fn format_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ProductId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Product ids the shopper ticked for checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutSelection {
    ids: HashSet<ProductId>,
}

impl CheckoutSelection {
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProductId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Select every line currently in the cart.
    pub fn all(state: &CartState) -> Self {
        Self {
            ids: state.iter().map(|item| item.product.id.clone()).collect(),
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<ProductId> {
        &self.ids
    }
}

/// What gets submitted as an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Selected lines, in cart order.
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl OrderDraft {
    /// Snapshot the selected lines of `state`.
    ///
    /// Selected ids that are not in the cart are ignored. Availability is
    /// rechecked here against the snapshot taken at add time.
    pub fn from_cart(
        state: &CartState,
        selection: &CheckoutSelection,
        policy: &DeliveryPolicy,
    ) -> Result<Self, CheckoutError> {
        let items: Vec<LineItem> = state
            .iter()
            .filter(|item| selection.contains(&item.product.id))
            .cloned()
            .collect();

        if items.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }

        let unavailable: Vec<ProductId> = items
            .iter()
            .filter(|item| !item.product.in_stock)
            .map(|item| item.product.id.clone())
            .collect();
        if !unavailable.is_empty() {
            return Err(CheckoutError::OutOfStock { ids: unavailable });
        }

        let subtotal = selection_subtotal(state, selection.ids());
        let delivery_fee = policy.fee(subtotal);
        Ok(Self {
            items,
            subtotal,
            delivery_fee,
            total: subtotal.saturating_add(delivery_fee),
        })
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Reset the cart after the order was accepted upstream.
pub fn complete_checkout(store: &CartStore, draft: &OrderDraft) {
    tracing::info!(
        key = store.key(),
        line_items = draft.items.len(),
        total = %draft.total,
        "Checkout completed, clearing cart"
    );
    store.dispatch(CartAction::set(CartState::default()));
}
