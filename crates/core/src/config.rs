//! Process-wide construction defaults
//!
//! When a convenience constructor is asked for both keys and names it must
//! pick a nesting order. The default is an explicit value scoped to the
//! process: set once at startup, immutable thereafter, keyed-outer unless
//! overridden. Constructors also accept a per-call order, which always
//! wins over the process default.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Which wrapper layer sits outermost when keys and names are combined.
///
/// Both orders are observably identical for indexing; the order only
/// affects the concrete type a constructor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapOrder {
    /// `Keyed(Named(raw))` — the keyed layer outermost (the default)
    #[default]
    KeyedOuter,
    /// `Named(Keyed(raw))` — the named layer outermost
    NamedOuter,
}

static DEFAULT_ORDER: OnceCell<WrapOrder> = OnceCell::new();

/// Set the process-wide default nesting order.
///
/// May be called at most once, before any construction that relies on the
/// default. Returns `Err` with the rejected value when a default is
/// already fixed.
pub fn set_default_wrap_order(order: WrapOrder) -> Result<(), WrapOrder> {
    DEFAULT_ORDER.set(order)
}

/// The process-wide default nesting order.
///
/// [`WrapOrder::KeyedOuter`] unless [`set_default_wrap_order`] fixed
/// another value at startup.
pub fn default_wrap_order() -> WrapOrder {
    DEFAULT_ORDER.get().copied().unwrap_or_default()
}
