//! Selectors: queries against a key sequence
//!
//! A [`Selector`] is the tagged query value resolved against one
//! dimension's [`AxisKeys`](crate::axis::AxisKeys). Scalar selectors
//! (`Exact`, `Nearest`, `Index`) resolve to a single position and collapse
//! their dimension; set-valued selectors (`Where`, `Between`, `All`)
//! resolve to an ordered index set and retain it.

use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Predicate over key values, used by [`Selector::Where`].
pub type KeyPredicate = dyn Fn(&Key) -> bool + Send + Sync;

/// Whether an interval includes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntervalBounds {
    /// `lo <= key <= hi` (the default)
    #[default]
    Closed,
    /// `lo <= key < hi`
    RightOpen,
}

/// A query against one dimension's key sequence.
pub enum Selector {
    /// First position whose key equals the value exactly
    Exact(Key),
    /// All positions whose key satisfies the predicate, in order
    Where(Arc<KeyPredicate>),
    /// The single position minimizing `|key - target|`, ties to the first
    Nearest(Key),
    /// All positions whose key lies in the interval, in order
    Between {
        /// Lower bound (inclusive)
        lo: Key,
        /// Upper bound
        hi: Key,
        /// Upper-bound inclusivity
        bounds: IntervalBounds,
    },
    /// Positional override: the integer is used directly, keys not consulted
    Index(usize),
    /// Full selection: every position, in order
    All,
}

impl Selector {
    /// Exact-value query.
    pub fn exact(key: impl Into<Key>) -> Self {
        Selector::Exact(key.into())
    }

    /// Predicate query.
    pub fn matching(pred: impl Fn(&Key) -> bool + Send + Sync + 'static) -> Self {
        Selector::Where(Arc::new(pred))
    }

    /// Nearest-key query.
    pub fn nearest(target: impl Into<Key>) -> Self {
        Selector::Nearest(target.into())
    }

    /// Closed-interval query `lo <= key <= hi`.
    pub fn between(lo: impl Into<Key>, hi: impl Into<Key>) -> Self {
        Selector::Between {
            lo: lo.into(),
            hi: hi.into(),
            bounds: IntervalBounds::Closed,
        }
    }

    /// Half-open interval query `lo <= key < hi`.
    pub fn between_right_open(lo: impl Into<Key>, hi: impl Into<Key>) -> Self {
        Selector::Between {
            lo: lo.into(),
            hi: hi.into(),
            bounds: IntervalBounds::RightOpen,
        }
    }

    /// Positional-override query.
    pub fn index(i: usize) -> Self {
        Selector::Index(i)
    }

    /// Full selection.
    pub fn all() -> Self {
        Selector::All
    }

    /// True when this selector resolves to a single position and therefore
    /// collapses its dimension.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Selector::Exact(_) | Selector::Nearest(_) | Selector::Index(_)
        )
    }
}

impl Clone for Selector {
    fn clone(&self) -> Self {
        match self {
            Selector::Exact(k) => Selector::Exact(k.clone()),
            Selector::Where(p) => Selector::Where(Arc::clone(p)),
            Selector::Nearest(k) => Selector::Nearest(k.clone()),
            Selector::Between { lo, hi, bounds } => Selector::Between {
                lo: lo.clone(),
                hi: hi.clone(),
                bounds: *bounds,
            },
            Selector::Index(i) => Selector::Index(*i),
            Selector::All => Selector::All,
        }
    }
}

// Manual Debug: the predicate is opaque.
impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Exact(k) => write!(f, "Exact({k})"),
            Selector::Where(_) => write!(f, "Where(<predicate>)"),
            Selector::Nearest(k) => write!(f, "Nearest({k})"),
            Selector::Between { lo, hi, bounds } => {
                write!(f, "Between({lo}, {hi}, {bounds:?})")
            }
            Selector::Index(i) => write!(f, "Index({i})"),
            Selector::All => write!(f, "All"),
        }
    }
}

/// One dimension's resolved selection, ready to apply positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPick {
    /// Single position; the dimension collapses out of the result
    One(usize),
    /// Ordered position set; the dimension is retained
    Many(Vec<usize>),
}

impl AxisPick {
    /// The positions selected, in order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            AxisPick::One(i) => vec![*i],
            AxisPick::Many(v) => v.clone(),
        }
    }

    /// True when the dimension collapses.
    pub fn is_scalar(&self) -> bool {
        matches!(self, AxisPick::One(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(matches!(Selector::exact(5i64), Selector::Exact(Key::Int(5))));
        assert!(matches!(Selector::nearest(0.5), Selector::Nearest(_)));
        assert!(matches!(Selector::index(2), Selector::Index(2)));
        assert!(matches!(Selector::all(), Selector::All));
    }

    #[test]
    fn test_between_defaults_closed() {
        match Selector::between(1i64, 5i64) {
            Selector::Between { bounds, .. } => assert_eq!(bounds, IntervalBounds::Closed),
            other => panic!("unexpected selector {other:?}"),
        }
        match Selector::between_right_open(1i64, 5i64) {
            Selector::Between { bounds, .. } => {
                assert_eq!(bounds, IntervalBounds::RightOpen)
            }
            other => panic!("unexpected selector {other:?}"),
        }
    }

    #[test]
    fn test_scalar_classification() {
        assert!(Selector::exact(1i64).is_scalar());
        assert!(Selector::nearest(1i64).is_scalar());
        assert!(Selector::index(0).is_scalar());
        assert!(!Selector::between(0i64, 1i64).is_scalar());
        assert!(!Selector::all().is_scalar());
        assert!(!Selector::matching(|_| true).is_scalar());
    }

    #[test]
    fn test_debug_hides_predicate() {
        let s = Selector::matching(|k| k.is_numeric());
        assert_eq!(format!("{s:?}"), "Where(<predicate>)");
    }

    #[test]
    fn test_clone_shares_predicate() {
        let s = Selector::matching(|k| *k == Key::Int(1));
        let c = s.clone();
        match (s, c) {
            (Selector::Where(a), Selector::Where(b)) => {
                assert!(a(&Key::Int(1)));
                assert!(b(&Key::Int(1)));
            }
            _ => panic!("clone changed variant"),
        }
    }

    #[test]
    fn test_axis_pick_indices() {
        assert_eq!(AxisPick::One(3).indices(), vec![3]);
        assert_eq!(AxisPick::Many(vec![0, 2]).indices(), vec![0, 2]);
        assert!(AxisPick::One(0).is_scalar());
        assert!(!AxisPick::Many(vec![]).is_scalar());
    }
}
