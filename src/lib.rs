//! Storefront shopping cart.
//!
//! A pure reducer over an ordered list of line items, wrapped in a store
//! that hydrates from and writes through to durable storage.
//!
//! ```text
//! CartAction ──→ CartReducer ──→ CartState ──→ view
//!                                    │
//!                                    └──→ CartStorage
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod storage;
pub mod store;

pub use cart::{CartAction, CartReducer, CartState, CartTotals, DeliveryPolicy, LineItem};
pub use cart::{ProductId, ProductSnapshot};
pub use store::CartStore;
