//! Named wrapper
//!
//! [`NamedArray`] composes an array-like value (a raw array or a keyed
//! wrapper) with a fixed tuple of dimension names. Name resolution is
//! independent of key values: a name selects a dimension, never a
//! position. When the inner value is keyed, the keyed surface forwards
//! through, so `Named(Keyed(raw))` behaves exactly like
//! `Keyed(Named(raw))`.

use crate::traits::{ArrayLike, KeyGet, KeyedLike, NamedLike, RawArray, ShapeVec};
use axle_core::error::{Error, Result};
use axle_core::{AxisKeys, AxisPick, Key, Selector};
use smallvec::SmallVec;

/// An array-like value plus one name per dimension.
#[derive(Debug, Clone)]
pub struct NamedArray<A> {
    inner: A,
    names: SmallVec<[String; 4]>,
}

impl<A: ArrayLike> NamedArray<A> {
    /// Wrap an inner value with one distinct name per dimension.
    pub fn new<S: Into<String>>(inner: A, names: impl IntoIterator<Item = S>) -> Result<Self> {
        let names: SmallVec<[String; 4]> = names.into_iter().map(Into::into).collect();
        if names.len() != inner.rank() {
            return Err(Error::Arity {
                expected: inner.rank(),
                actual: names.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(Error::InvalidName(name.clone()));
            }
            if names[..i].contains(name) {
                return Err(Error::DuplicateName(name.clone()));
            }
        }
        Ok(NamedArray { inner, names })
    }

    // names already validated; used when re-wrapping reduced results
    fn from_validated(inner: A, names: SmallVec<[String; 4]>) -> Self {
        NamedArray { inner, names }
    }

    /// The inner wrapped value.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap, discarding the names.
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Name-qualified positional get: every dimension named exactly once.
    ///
    /// Name resolution never consults keys; the integer is applied
    /// positionally.
    pub fn at(&self, coords: &[(&str, usize)]) -> Result<A::Elem> {
        crate::compose::get_named(self, coords)
    }

    /// Name-qualified positional slice.
    ///
    /// Unnamed dimensions pass through unchanged; `AxisPick::One` entries
    /// collapse their dimension (and drop its name).
    pub fn slice_at(&self, coords: &[(&str, AxisPick)]) -> Result<Self>
    where
        A: RawArray,
    {
        let rank = self.rank();
        let mut picks: Vec<Option<AxisPick>> = (0..rank).map(|_| None).collect();
        for (name, pick) in coords {
            let dim = self.dim_index(name)?;
            if picks[dim].is_some() {
                return Err(Error::InvalidSelector {
                    dim,
                    reason: format!("dimension {name:?} specified twice"),
                });
            }
            picks[dim] = Some(pick.clone());
        }
        let full: Vec<AxisPick> = picks
            .into_iter()
            .enumerate()
            .map(|(dim, pick)| {
                pick.unwrap_or_else(|| AxisPick::Many((0..self.extent(dim)).collect()))
            })
            .collect();
        self.select(&full)
    }
}

impl<A: ArrayLike> ArrayLike for NamedArray<A> {
    type Elem = A::Elem;

    fn rank(&self) -> usize {
        self.inner.rank()
    }

    fn shape(&self) -> ShapeVec {
        self.inner.shape()
    }

    fn get(&self, index: &[usize]) -> Result<A::Elem> {
        self.inner.get(index)
    }

    fn set(&mut self, index: &[usize], value: A::Elem) -> Result<()> {
        self.inner.set(index, value)
    }
}

impl<A: RawArray> RawArray for NamedArray<A> {
    fn origin(&self, dim: usize) -> usize {
        self.inner.origin(dim)
    }

    fn append(&mut self, dim: usize, values: Vec<A::Elem>) -> Result<()> {
        self.inner.append(dim, values)
    }

    fn select(&self, picks: &[AxisPick]) -> Result<Self> {
        let sub = self.inner.select(picks)?;
        // collapsed dimensions lose their names
        let names: SmallVec<[String; 4]> = self
            .names
            .iter()
            .zip(picks.iter())
            .filter(|(_, pick)| !pick.is_scalar())
            .map(|(name, _)| name.clone())
            .collect();
        Ok(NamedArray::from_validated(sub, names))
    }
}

impl<A: ArrayLike> NamedLike for NamedArray<A> {
    fn names(&self) -> Vec<String> {
        self.names.to_vec()
    }

    fn dim_index(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }
}

impl<A: KeyedLike> KeyedLike for NamedArray<A> {
    type Reduced = NamedArray<A::Reduced>;

    fn axis_keys(&self, dim: usize) -> Result<AxisKeys> {
        self.inner.axis_keys(dim)
    }

    fn axes(&self) -> Vec<AxisKeys> {
        self.inner.axes()
    }

    fn resolve(&self, dim: usize, sel: &Selector) -> Result<AxisPick> {
        self.inner.resolve(dim, sel)
    }

    fn get_by_key(&self, queries: Vec<Selector>) -> Result<KeyGet<A::Elem, Self::Reduced>> {
        // resolution is pure, so re-resolving to learn which dimensions
        // survive matches what the inner layer will do
        let mut kept: SmallVec<[String; 4]> = SmallVec::new();
        if queries.len() > self.rank() {
            return Err(Error::Arity {
                expected: self.rank(),
                actual: queries.len(),
            });
        }
        for dim in 0..self.rank() {
            let retained = match queries.get(dim) {
                Some(sel) => !self.resolve(dim, sel)?.is_scalar(),
                None => true,
            };
            if retained {
                kept.push(self.names[dim].clone());
            }
        }
        match self.inner.get_by_key(queries)? {
            KeyGet::Scalar(elem) => Ok(KeyGet::Scalar(elem)),
            KeyGet::Reduced(sub) => {
                Ok(KeyGet::Reduced(NamedArray::from_validated(sub, kept)))
            }
        }
    }

    fn push(&mut self, dim: usize, values: Vec<A::Elem>, new_key: Option<Key>) -> Result<()> {
        // growth never changes rank, so the name tuple is untouched
        self.inner.push(dim, values, new_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::DenseArray;
    use crate::keyed::KeyedArray;

    fn named_matrix() -> NamedArray<DenseArray<i32>> {
        let raw = DenseArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        NamedArray::new(raw, ["row", "col"]).unwrap()
    }

    // === Construction ===

    #[test]
    fn test_construction_arity_checked() {
        let raw = DenseArray::from_vec(vec![1, 2]);
        let err = NamedArray::new(raw, ["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            Error::Arity {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_construction_rejects_duplicates() {
        let raw = DenseArray::from_rows(vec![vec![1], vec![2]]).unwrap();
        let err = NamedArray::new(raw, ["x", "x"]).unwrap_err();
        assert_eq!(err, Error::DuplicateName("x".into()));
    }

    #[test]
    fn test_construction_rejects_empty_name() {
        let raw = DenseArray::from_vec(vec![1]);
        let err = NamedArray::new(raw, [""]).unwrap_err();
        assert_eq!(err, Error::InvalidName(String::new()));
    }

    // === Name resolution ===

    #[test]
    fn test_dim_index() {
        let a = named_matrix();
        assert_eq!(a.dim_index("row").unwrap(), 0);
        assert_eq!(a.dim_index("col").unwrap(), 1);
        assert_eq!(
            a.dim_index("depth").unwrap_err(),
            Error::UnknownName("depth".into())
        );
    }

    // === Name-qualified positional indexing ===

    #[test]
    fn test_at_orders_by_name_not_position() {
        let a = named_matrix();
        assert_eq!(a.at(&[("col", 2), ("row", 0)]).unwrap(), 3);
        assert_eq!(a.at(&[("row", 1), ("col", 0)]).unwrap(), 4);
    }

    #[test]
    fn test_at_requires_every_dimension() {
        let a = named_matrix();
        assert!(matches!(a.at(&[("row", 0)]), Err(Error::Arity { .. })));
    }

    #[test]
    fn test_slice_at_collapses_and_renames() {
        let a = named_matrix();
        let row = a.slice_at(&[("row", AxisPick::One(1))]).unwrap();
        assert_eq!(row.rank(), 1);
        assert_eq!(row.names(), vec!["col".to_string()]);
        assert_eq!(row.get(&[2]).unwrap(), 6);
    }

    #[test]
    fn test_slice_at_retains_picked_subset() {
        let a = named_matrix();
        let sub = a
            .slice_at(&[("col", AxisPick::Many(vec![0, 2]))])
            .unwrap();
        assert_eq!(sub.shape().to_vec(), vec![2, 2]);
        assert_eq!(sub.names(), vec!["row".to_string(), "col".to_string()]);
        assert_eq!(sub.get(&[1, 1]).unwrap(), 6);
    }

    #[test]
    fn test_positional_indexing_unchanged() {
        let a = named_matrix();
        assert_eq!(a.get(&[1, 1]).unwrap(), 5);
    }

    // === Keyed forwarding (Named over Keyed) ===

    fn named_over_keyed() -> NamedArray<KeyedArray<DenseArray<i32>>> {
        let raw = DenseArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let keyed = KeyedArray::with_keys(
            raw,
            vec![
                AxisKeys::int_range(10, 10, 2).unwrap(),
                AxisKeys::values(["a", "b", "c"]),
            ],
        )
        .unwrap();
        NamedArray::new(keyed, ["row", "col"]).unwrap()
    }

    #[test]
    fn test_keyed_surface_forwards() {
        let a = named_over_keyed();
        let got = a
            .get_by_key(vec![Selector::exact(20i64), Selector::exact("b")])
            .unwrap();
        assert_eq!(got.scalar(), Some(5));
    }

    #[test]
    fn test_reduced_result_keeps_surviving_names() {
        let a = named_over_keyed();
        let sub = a
            .get_by_key(vec![Selector::exact(10i64)])
            .unwrap()
            .reduced()
            .unwrap();
        assert_eq!(sub.names(), vec!["col".to_string()]);
        assert_eq!(sub.axis_keys(0).unwrap(), AxisKeys::values(["a", "b", "c"]));
        assert_eq!(sub.get(&[1]).unwrap(), 2);
    }

    #[test]
    fn test_push_forwards_through_names() {
        let mut a = named_over_keyed();
        a.push(0, vec![7, 8, 9], None).unwrap();
        assert_eq!(a.extent(0), 3);
        assert_eq!(a.names(), vec!["row".to_string(), "col".to_string()]);
        assert_eq!(a.axis_keys(0).unwrap().at(2), Some(Key::Int(30)));
    }
}
