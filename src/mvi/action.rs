//! Base trait for dispatchable actions.

/// Marker trait for action objects.
///
/// Actions represent:
/// - User actions ("Add to Cart", "+", "-", "Remove")
/// - System events (hydration from storage, checkout completion)
///
/// Actions are processed by reducers to produce new states.
pub trait Action: Send + 'static {}
