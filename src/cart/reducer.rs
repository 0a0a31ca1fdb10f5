//! Reducer for cart state transitions.

use crate::mvi::Reducer;

use super::action::CartAction;
use super::product::{ProductId, ProductSnapshot};
use super::state::{CartState, LineItem};

/// Pure cart reducer.
///
/// Total over its input: missing product ids, zero quantities, invalid
/// products and unknown actions all return the state unchanged. Persistence happens in
/// [`crate::store::CartStore`], never here.
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            CartAction::AddToCart { product, quantity } => add(state, product, quantity),
            CartAction::IncreaseQty { product_id } => increase(state, &product_id),
            CartAction::DecreaseQty { product_id } => decrease(state, &product_id),
            CartAction::RemoveFromCart { product_id } => remove(state, &product_id),
            CartAction::SetCart { state: next } => next,
            CartAction::ClearCart => CartState::default(),
            CartAction::Unknown => state,
        }
    }
}

fn add(mut state: CartState, product: ProductSnapshot, quantity: u32) -> CartState {
    if quantity == 0 || !product.is_valid() {
        return state;
    }

    let items = state.items_mut();
    match items.iter_mut().find(|item| item.product.id == product.id) {
        // Keep the snapshot taken at first add.
        Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
        None => items.push(LineItem::new(product, quantity)),
    }
    state
}

fn increase(mut state: CartState, product_id: &ProductId) -> CartState {
    if let Some(item) = state
        .items_mut()
        .iter_mut()
        .find(|item| &item.product.id == product_id)
    {
        item.quantity = item.quantity.saturating_add(1);
    }
    state
}

fn decrease(mut state: CartState, product_id: &ProductId) -> CartState {
    let items = state.items_mut();
    if let Some(index) = items
        .iter()
        .position(|item| &item.product.id == product_id)
    {
        if items[index].quantity > 1 {
            items[index].quantity -= 1;
        } else {
            items.remove(index);
        }
    }
    state
}

fn remove(mut state: CartState, product_id: &ProductId) -> CartState {
    state
        .items_mut()
        .retain(|item| &item.product.id != product_id);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {id}"), Decimal::from(price))
    }

    fn cart_with(id: &str, quantity: u32) -> CartState {
        CartState::from_items(vec![LineItem::new(product(id, 100), quantity)])
    }

    #[test]
    fn add_appends_new_line_item() {
        let state = CartReducer::reduce(CartState::default(), CartAction::add(product("a", 100)));
        assert_eq!(state.len(), 1);
        assert_eq!(state.quantity_of(&"a".into()), 1);
    }

    #[test]
    fn add_accumulates_existing_quantity() {
        let state = cart_with("a", 2);
        let state = CartReducer::reduce(state, CartAction::add_quantity(product("a", 100), 3));
        assert_eq!(state.len(), 1);
        assert_eq!(state.quantity_of(&"a".into()), 5);
    }

    #[test]
    fn add_keeps_first_snapshot_price() {
        let state = cart_with("a", 1);
        let state = CartReducer::reduce(state, CartAction::add(product("a", 150)));
        let item = state.get(&"a".into()).unwrap();
        assert_eq!(item.product.price, Decimal::from(100));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn add_zero_quantity_is_noop() {
        let state = CartReducer::reduce(
            CartState::default(),
            CartAction::add_quantity(product("a", 100), 0),
        );
        assert!(state.is_empty());
    }

    #[test]
    fn add_negative_price_is_noop() {
        let state = CartReducer::reduce(CartState::default(), CartAction::add(product("a", -500)));
        assert!(state.is_empty());
    }

    #[test]
    fn add_empty_id_is_noop() {
        let state = CartReducer::reduce(CartState::default(), CartAction::add(product("", 10)));
        assert!(state.is_empty());
    }

    #[test]
    fn add_preserves_insertion_order() {
        let state = CartState::default();
        let state = CartReducer::reduce(state, CartAction::add(product("b", 1)));
        let state = CartReducer::reduce(state, CartAction::add(product("a", 1)));
        let state = CartReducer::reduce(state, CartAction::add(product("b", 1)));
        let ids: Vec<&str> = state.iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let state = cart_with("a", u32::MAX - 1);
        let state = CartReducer::reduce(state, CartAction::add_quantity(product("a", 1), 5));
        assert_eq!(state.quantity_of(&"a".into()), u32::MAX);
    }

    #[test]
    fn increase_increments_by_one() {
        let state = CartReducer::reduce(cart_with("a", 1), CartAction::increase("a"));
        assert_eq!(state.quantity_of(&"a".into()), 2);
    }

    #[test]
    fn decrease_decrements_by_one() {
        let state = CartReducer::reduce(cart_with("a", 3), CartAction::decrease("a"));
        assert_eq!(state.quantity_of(&"a".into()), 2);
    }

    #[test]
    fn decrease_at_one_removes_line_item() {
        let state = CartReducer::reduce(cart_with("a", 1), CartAction::decrease("a"));
        assert!(state.is_empty());
    }

    #[test]
    fn remove_drops_line_item() {
        let state = CartReducer::reduce(cart_with("a", 4), CartAction::remove("a"));
        assert!(!state.contains(&"a".into()));
    }

    #[test]
    fn missing_ids_are_noops() {
        let original = cart_with("a", 2);
        for action in [
            CartAction::increase("zzz"),
            CartAction::decrease("zzz"),
            CartAction::remove("zzz"),
        ] {
            let next = CartReducer::reduce(original.clone(), action);
            assert_eq!(next, original);
        }
    }

    #[test]
    fn set_cart_replaces_wholesale() {
        let replacement = cart_with("b", 7);
        let state = CartReducer::reduce(cart_with("a", 1), CartAction::set(replacement.clone()));
        assert_eq!(state, replacement);
    }

    #[test]
    fn clear_cart_empties() {
        let state = CartReducer::reduce(cart_with("a", 2), CartAction::ClearCart);
        assert!(state.is_empty());
    }

    #[test]
    fn unknown_action_is_noop() {
        let original = cart_with("a", 2);
        let state = CartReducer::reduce(original.clone(), CartAction::Unknown);
        assert_eq!(state, original);
    }
}
