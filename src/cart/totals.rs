//! Derived aggregates. Recomputed on demand, never persisted.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductId;
use super::state::CartState;

/// Sum of quantities across all line items.
pub fn item_count(state: &CartState) -> u64 {
    state.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of unit price times quantity, saturating at `Decimal::MAX`.
pub fn subtotal(state: &CartState) -> Decimal {
    saturating_sum(state.iter().map(|item| item.line_total()))
}

/// Subtotal restricted to `selection`. Ids not in the cart contribute nothing.
pub fn selection_subtotal(state: &CartState, selection: &HashSet<ProductId>) -> Decimal {
    let totals = state
        .iter()
        .filter(|item| selection.contains(&item.product.id))
        .map(|item| item.line_total());
    saturating_sum(totals)
}

/// Money sums never panic; an absurd cart shows `Decimal::MAX`.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Flat delivery fee waived at or above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    /// Subtotal at which delivery becomes free (inclusive).
    #[serde(default = "default_free_threshold")]
    pub free_threshold: Decimal,
    #[serde(default = "default_flat_fee")]
    pub flat_fee: Decimal,
}

fn default_free_threshold() -> Decimal {
    Decimal::from(500)
}

fn default_flat_fee() -> Decimal {
    Decimal::from(40)
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            free_threshold: default_free_threshold(),
            flat_fee: default_flat_fee(),
        }
    }
}

impl DeliveryPolicy {
    pub fn new(free_threshold: Decimal, flat_fee: Decimal) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// Nothing to deliver costs nothing.
    pub fn fee(&self, subtotal: Decimal) -> Decimal {
        if subtotal.is_zero() || subtotal >= self.free_threshold {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }
}

/// Everything a cart summary panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    pub fn compute(state: &CartState, policy: &DeliveryPolicy) -> Self {
        let subtotal = subtotal(state);
        let delivery_fee = policy.fee(subtotal);
        Self {
            item_count: item_count(state),
            subtotal,
            delivery_fee,
            total: subtotal.saturating_add(delivery_fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{LineItem, ProductSnapshot};

    fn cart(lines: &[(&str, i64, u32)]) -> CartState {
        CartState::from_items(
            lines
                .iter()
                .map(|(id, price, qty)| {
                    LineItem::new(ProductSnapshot::new(*id, *id, Decimal::from(*price)), *qty)
                })
                .collect(),
        )
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let state = cart(&[("a", 100, 2), ("b", 50, 1)]);
        assert_eq!(subtotal(&state), Decimal::from(250));
    }

    #[test]
    fn item_count_sums_quantities() {
        let state = cart(&[("a", 100, 2), ("b", 50, 3)]);
        assert_eq!(item_count(&state), 5);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = CartTotals::compute(&CartState::default(), &DeliveryPolicy::default());
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.delivery_fee, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn selection_subtotal_ignores_unselected_and_unknown_ids() {
        let state = cart(&[("a", 100, 2), ("b", 50, 1), ("c", 10, 4)]);
        let selection: HashSet<ProductId> =
            ["a", "c", "missing"].into_iter().map(ProductId::from).collect();
        assert_eq!(selection_subtotal(&state, &selection), Decimal::from(240));
    }

    #[test]
    fn delivery_fee_boundaries() {
        let policy = DeliveryPolicy::default();
        assert_eq!(policy.fee(Decimal::from(500)), Decimal::ZERO);
        assert_eq!(policy.fee(Decimal::from(499)), Decimal::from(40));
        assert_eq!(policy.fee(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(policy.fee(Decimal::from(10_000)), Decimal::ZERO);
    }

    #[test]
    fn overflowing_totals_saturate() {
        let state = CartState::from_items(vec![
            LineItem::new(ProductSnapshot::new("a", "A", Decimal::MAX), 2),
            LineItem::new(ProductSnapshot::new("b", "B", Decimal::MAX), 1),
        ]);
        let totals = CartTotals::compute(&state, &DeliveryPolicy::default());
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.delivery_fee, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::MAX);

        let selection: HashSet<ProductId> = ["a", "b"].into_iter().map(ProductId::from).collect();
        assert_eq!(selection_subtotal(&state, &selection), Decimal::MAX);
    }

    #[test]
    fn totals_add_delivery_fee_below_threshold() {
        let state = cart(&[("a", 120, 2)]);
        let totals = CartTotals::compute(&state, &DeliveryPolicy::default());
        assert_eq!(totals.subtotal, Decimal::from(240));
        assert_eq!(totals.delivery_fee, Decimal::from(40));
        assert_eq!(totals.total, Decimal::from(280));
    }
}
