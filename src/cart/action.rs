//! Actions that can be dispatched to the cart.

use serde::{Deserialize, Serialize};

use crate::mvi::Action;

use super::product::{ProductId, ProductSnapshot};
use super::state::CartState;

/// Everything the cart knows how to do.
///
/// Tagged by `type` so a UI layer can send actions as JSON text,
/// e.g. `{"type":"INCREASE_QTY","product_id":"p-1"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add `quantity` units, accumulating onto an existing line item.
    AddToCart {
        product: ProductSnapshot,
        #[serde(default = "default_quantity")]
        quantity: u32,
    },

    /// "+" button.
    IncreaseQty { product_id: ProductId },

    /// "-" button. Removes the line item when it would reach zero.
    DecreaseQty { product_id: ProductId },

    RemoveFromCart { product_id: ProductId },

    /// Replace the whole cart (hydration, post-checkout reset).
    SetCart { state: CartState },

    ClearCart,

    /// Any `type` this build does not recognise. Reduces to a no-op.
    #[serde(other)]
    Unknown,
}

fn default_quantity() -> u32 {
    1
}

impl Action for CartAction {}

impl CartAction {
    pub fn add(product: ProductSnapshot) -> Self {
        Self::AddToCart {
            product,
            quantity: 1,
        }
    }

    pub fn add_quantity(product: ProductSnapshot, quantity: u32) -> Self {
        Self::AddToCart { product, quantity }
    }

    pub fn increase(product_id: impl Into<ProductId>) -> Self {
        Self::IncreaseQty {
            product_id: product_id.into(),
        }
    }

    pub fn decrease(product_id: impl Into<ProductId>) -> Self {
        Self::DecreaseQty {
            product_id: product_id.into(),
        }
    }

    pub fn remove(product_id: impl Into<ProductId>) -> Self {
        Self::RemoveFromCart {
            product_id: product_id.into(),
        }
    }

    pub fn set(state: CartState) -> Self {
        Self::SetCart { state }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "ADD_TO_CART",
            Self::IncreaseQty { .. } => "INCREASE_QTY",
            Self::DecreaseQty { .. } => "DECREASE_QTY",
            Self::RemoveFromCart { .. } => "REMOVE_FROM_CART",
            Self::SetCart { .. } => "SET_CART",
            Self::ClearCart => "CLEAR_CART",
            Self::Unknown => "UNKNOWN",
        }
    }
}
