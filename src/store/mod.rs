//! Cart store: the single live cart for the application's lifetime.
//!
//! Bridges [`CartReducer`] to [`CartStorage`]:
//! - hydrates from storage once, on open
//! - writes the full state back after every dispatch that changes it
//!
//! The state cell sits behind a mutex held for the whole
//! read-reduce-write sequence, so concurrent dispatches serialize and
//! storage writes land in dispatch order.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cart::{CartAction, CartReducer, CartState, CartTotals, DeliveryPolicy};
use crate::mvi::Reducer;
use crate::storage::{validate_key, CartStorage, StorageError};

/// Cloneable handle to one cart. Clones share the same state cell.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: Mutex<CartState>,
    storage: Box<dyn CartStorage>,
    key: String,
}

impl CartStore {
    /// Open the cart persisted under `key`, starting empty if there is none.
    ///
    /// Unreadable or corrupt stored text is logged and ignored.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] if `key` cannot name a storage entry.
    pub fn open(
        storage: impl CartStorage + 'static,
        key: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;

        let store = Self {
            inner: Arc::new(CartStoreInner {
                state: Mutex::new(CartState::default()),
                storage: Box::new(storage),
                key,
            }),
        };

        if let Some(persisted) = store.inner.load() {
            tracing::info!(
                key = %store.inner.key,
                line_items = persisted.len(),
                "Hydrated cart from storage"
            );
            store.dispatch(CartAction::set(persisted));
        }
        Ok(store)
    }

    /// Snapshot of the current cart.
    pub fn state(&self) -> CartState {
        self.inner.state.lock().clone()
    }

    /// Run `action` through the reducer and persist the result if it changed.
    ///
    /// Never fails: a storage write error is logged and the in-memory cart
    /// keeps the new state.
    pub fn dispatch(&self, action: CartAction) {
        let kind = action.kind();
        let mut state = self.inner.state.lock();

        let next = CartReducer::reduce(state.clone(), action);
        if next == *state {
            tracing::trace!(action = kind, "Cart unchanged");
            return;
        }

        *state = next;
        tracing::debug!(action = kind, line_items = state.len(), "Cart updated");
        self.inner.persist(&state);
    }

    /// Totals for the current cart under `policy`.
    pub fn totals(&self, policy: &DeliveryPolicy) -> CartTotals {
        CartTotals::compute(&self.inner.state.lock(), policy)
    }

    /// Storage key this cart persists under.
    pub fn key(&self) -> &str {
        &self.inner.key
    }
}

impl CartStoreInner {
    fn load(&self) -> Option<CartState> {
        let text = match self.storage.read(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return None;
            }
        };

        match serde_json::from_str::<CartState>(&text) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored cart is corrupt, starting empty");
                None
            }
        }
    }

    fn persist(&self, state: &CartState) {
        let text = match serde_json::to_string(state) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.key, &text) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}
