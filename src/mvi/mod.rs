//! Model-View-Intent primitives for the cart.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of the cart
//! - **Action**: User clicks or system events (hydration, checkout)
//! - **Reducer**: Pure function that produces the next state

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::State;
