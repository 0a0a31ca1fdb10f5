//! Shopping cart: data model, reducer and derived totals.

mod action;
mod product;
mod reducer;
mod state;
pub mod totals;

pub use action::CartAction;
pub use product::{ProductId, ProductSnapshot};
pub use reducer::CartReducer;
pub use state::{CartState, LineItem};
pub use totals::{CartTotals, DeliveryPolicy};
