//! Composition of the keyed and named layers
//!
//! A [`Composite`] nests a keyed wrapper and a named wrapper around one
//! raw array, in either order. Both orders present identical observable
//! behavior for positional, key-based and name-based indexing; which one
//! a constructor produces is configuration, not semantics.
//!
//! Combined queries (`name = selector`) resolve in two fixed stages
//! regardless of nesting: the name picks the dimension through the named
//! layer, then the selector resolves against that dimension's keys through
//! the Key Index, and the result applies positionally.

use crate::named::NamedArray;
use crate::keyed::KeyedArray;
use crate::traits::{ArrayLike, KeyGet, KeyedLike, NamedLike, RawArray, ShapeVec};
use axle_core::config::{default_wrap_order, WrapOrder};
use axle_core::error::{Error, Result};
use axle_core::{AxisKeys, AxisPick, Key, Selector};

/// Per-dimension construction request: an optional name, optional keys.
///
/// A dimension with neither gets positional keys and a synthesized name
/// (`dim0`, `dim1`, ..).
#[derive(Debug, Clone, Default)]
pub struct AxisSpec {
    name: Option<String>,
    keys: Option<AxisKeys>,
}

impl AxisSpec {
    /// A dimension with neither name nor keys.
    pub fn new() -> Self {
        AxisSpec::default()
    }

    /// A dimension with a name only.
    pub fn named(name: impl Into<String>) -> Self {
        AxisSpec {
            name: Some(name.into()),
            keys: None,
        }
    }

    /// A dimension with keys only.
    pub fn keyed(keys: AxisKeys) -> Self {
        AxisSpec {
            name: None,
            keys: Some(keys),
        }
    }

    /// Add a name to this spec.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add keys to this spec.
    pub fn with_keys(mut self, keys: AxisKeys) -> Self {
        self.keys = Some(keys);
        self
    }
}

/// Keyed and named wrappers nested around one raw array.
#[derive(Debug, Clone)]
pub enum Composite<A: RawArray> {
    /// `Keyed(Named(raw))`
    KeyedOuter(KeyedArray<NamedArray<A>>),
    /// `Named(Keyed(raw))`
    NamedOuter(NamedArray<KeyedArray<A>>),
}

impl<A: RawArray> Composite<A> {
    /// Construct with the process-wide default nesting order.
    pub fn new(raw: A, specs: Vec<AxisSpec>) -> Result<Self> {
        Self::with_order(raw, specs, default_wrap_order())
    }

    /// Construct with an explicit nesting order, overriding the default.
    pub fn with_order(raw: A, specs: Vec<AxisSpec>, order: WrapOrder) -> Result<Self> {
        if specs.len() != raw.rank() {
            return Err(Error::Arity {
                expected: raw.rank(),
                actual: specs.len(),
            });
        }
        let mut names = Vec::with_capacity(specs.len());
        let mut keys = Vec::with_capacity(specs.len());
        for (dim, spec) in specs.into_iter().enumerate() {
            names.push(spec.name.unwrap_or_else(|| format!("dim{dim}")));
            keys.push(spec.keys);
        }
        match order {
            WrapOrder::KeyedOuter => {
                let named = NamedArray::new(raw, names)?;
                Ok(Composite::KeyedOuter(KeyedArray::new(named, keys)?))
            }
            WrapOrder::NamedOuter => {
                let keyed = KeyedArray::new(raw, keys)?;
                Ok(Composite::NamedOuter(NamedArray::new(keyed, names)?))
            }
        }
    }

    /// Which layer is outermost in this value.
    pub fn order(&self) -> WrapOrder {
        match self {
            Composite::KeyedOuter(_) => WrapOrder::KeyedOuter,
            Composite::NamedOuter(_) => WrapOrder::NamedOuter,
        }
    }
}

impl<A: RawArray> ArrayLike for Composite<A> {
    type Elem = A::Elem;

    fn rank(&self) -> usize {
        match self {
            Composite::KeyedOuter(a) => a.rank(),
            Composite::NamedOuter(a) => a.rank(),
        }
    }

    fn shape(&self) -> ShapeVec {
        match self {
            Composite::KeyedOuter(a) => a.shape(),
            Composite::NamedOuter(a) => a.shape(),
        }
    }

    fn get(&self, index: &[usize]) -> Result<A::Elem> {
        match self {
            Composite::KeyedOuter(a) => a.get(index),
            Composite::NamedOuter(a) => a.get(index),
        }
    }

    fn set(&mut self, index: &[usize], value: A::Elem) -> Result<()> {
        match self {
            Composite::KeyedOuter(a) => a.set(index, value),
            Composite::NamedOuter(a) => a.set(index, value),
        }
    }
}

impl<A: RawArray> RawArray for Composite<A> {
    fn origin(&self, _dim: usize) -> usize {
        0
    }

    fn append(&mut self, dim: usize, values: Vec<A::Elem>) -> Result<()> {
        match self {
            Composite::KeyedOuter(a) => a.append(dim, values),
            Composite::NamedOuter(a) => a.append(dim, values),
        }
    }

    fn select(&self, picks: &[AxisPick]) -> Result<Self> {
        match self {
            Composite::KeyedOuter(a) => a.select(picks).map(Composite::KeyedOuter),
            Composite::NamedOuter(a) => a.select(picks).map(Composite::NamedOuter),
        }
    }
}

impl<A: RawArray> KeyedLike for Composite<A> {
    type Reduced = Composite<A>;

    fn axis_keys(&self, dim: usize) -> Result<AxisKeys> {
        match self {
            Composite::KeyedOuter(a) => a.axis_keys(dim),
            Composite::NamedOuter(a) => a.axis_keys(dim),
        }
    }

    fn axes(&self) -> Vec<AxisKeys> {
        match self {
            Composite::KeyedOuter(a) => a.axes(),
            Composite::NamedOuter(a) => a.axes(),
        }
    }

    fn resolve(&self, dim: usize, sel: &Selector) -> Result<AxisPick> {
        match self {
            Composite::KeyedOuter(a) => a.resolve(dim, sel),
            Composite::NamedOuter(a) => a.resolve(dim, sel),
        }
    }

    fn get_by_key(&self, queries: Vec<Selector>) -> Result<KeyGet<A::Elem, Self>> {
        match self {
            Composite::KeyedOuter(a) => Ok(match a.get_by_key(queries)? {
                KeyGet::Scalar(e) => KeyGet::Scalar(e),
                KeyGet::Reduced(r) => KeyGet::Reduced(Composite::KeyedOuter(r)),
            }),
            Composite::NamedOuter(a) => Ok(match a.get_by_key(queries)? {
                KeyGet::Scalar(e) => KeyGet::Scalar(e),
                KeyGet::Reduced(r) => KeyGet::Reduced(Composite::NamedOuter(r)),
            }),
        }
    }

    fn push(&mut self, dim: usize, values: Vec<A::Elem>, new_key: Option<Key>) -> Result<()> {
        match self {
            Composite::KeyedOuter(a) => a.push(dim, values, new_key),
            Composite::NamedOuter(a) => a.push(dim, values, new_key),
        }
    }
}

impl<A: RawArray> NamedLike for Composite<A> {
    fn names(&self) -> Vec<String> {
        match self {
            Composite::KeyedOuter(a) => a.names(),
            Composite::NamedOuter(a) => a.names(),
        }
    }

    fn dim_index(&self, name: &str) -> Result<usize> {
        match self {
            Composite::KeyedOuter(a) => a.dim_index(name),
            Composite::NamedOuter(a) => a.dim_index(name),
        }
    }
}

/// Name-qualified positional get: `a[name = index, ..]`.
///
/// Every dimension must be named exactly once; the integers apply
/// positionally and key metadata is never consulted.
pub fn get_named<T: NamedLike>(a: &T, coords: &[(&str, usize)]) -> Result<T::Elem> {
    let rank = a.rank();
    let mut slots: Vec<Option<usize>> = vec![None; rank];
    for (name, pos) in coords {
        let dim = a.dim_index(name)?;
        if slots[dim].is_some() {
            return Err(Error::InvalidSelector {
                dim,
                reason: format!("dimension {name:?} specified twice"),
            });
        }
        slots[dim] = Some(*pos);
    }
    let mut index = Vec::with_capacity(rank);
    for slot in slots {
        match slot {
            Some(pos) => index.push(pos),
            None => {
                return Err(Error::Arity {
                    expected: rank,
                    actual: coords.len(),
                })
            }
        }
    }
    a.get(&index)
}

/// Combined name + key query: `a(name = selector, ..)`.
///
/// Stage one resolves each name to a dimension through the named layer;
/// stage two resolves each selector against that dimension's keys; the
/// resulting positions apply through the keyed layer. Unnamed dimensions
/// pass through unchanged. Identical for both nesting orders.
pub fn select_named<T: KeyedLike + NamedLike>(
    a: &T,
    query: Vec<(&str, Selector)>,
) -> Result<KeyGet<T::Elem, T::Reduced>> {
    let rank = a.rank();
    let mut slots: Vec<Option<Selector>> = (0..rank).map(|_| None).collect();
    for (name, sel) in query {
        let dim = a.dim_index(name)?;
        if slots[dim].is_some() {
            return Err(Error::InvalidSelector {
                dim,
                reason: format!("dimension {name:?} queried twice"),
            });
        }
        slots[dim] = Some(sel);
    }
    let selectors: Vec<Selector> = slots
        .into_iter()
        .map(|slot| slot.unwrap_or(Selector::All))
        .collect();
    a.get_by_key(selectors)
}

/// Growth addressed by dimension name.
pub fn push_named<T: KeyedLike + NamedLike>(
    a: &mut T,
    name: &str,
    values: Vec<T::Elem>,
    new_key: Option<Key>,
) -> Result<()> {
    let dim = a.dim_index(name)?;
    a.push(dim, values, new_key)
}
