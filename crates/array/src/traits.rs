//! Array trait seams
//!
//! These traits separate the wrapper layer from the containers it wraps:
//!
//! - [`ArrayLike`]: the minimal positional surface every layer presents.
//! - [`RawArray`]: the collaborator contract an underlying container must
//!   satisfy (origin query, append for growth, Cartesian select).
//! - [`KeyedLike`] / [`NamedLike`]: the keyed and named surfaces, which
//!   wrappers forward through each other so both nesting orders present
//!   identical behavior.
//!
//! Swapping the container (dense reference array, caller-owned storage)
//! never breaks the wrapper layers above.

use axle_core::error::{Error, Result};
use axle_core::{AxisKeys, AxisPick, Key, Selector};
use smallvec::SmallVec;

/// Fixed-capacity shape/index vector; rank is fixed at construction and
/// rarely above four.
pub type ShapeVec = SmallVec<[usize; 4]>;

/// Minimal positional surface shared by raw arrays and every wrapper.
///
/// Indices are 0-based at this surface regardless of the underlying
/// container's index origin.
pub trait ArrayLike {
    /// Element type
    type Elem: Clone;

    /// Number of dimensions, fixed at construction.
    fn rank(&self) -> usize;

    /// Extent per dimension.
    fn shape(&self) -> ShapeVec;

    /// Extent of one dimension.
    ///
    /// # Panics
    ///
    /// Panics when `dim >= rank()`; operations validate dimensions before
    /// calling this.
    fn extent(&self, dim: usize) -> usize {
        self.shape()[dim]
    }

    /// Positional element get. One index per dimension.
    fn get(&self, index: &[usize]) -> Result<Self::Elem>;

    /// Positional element set. One index per dimension.
    fn set(&mut self, index: &[usize], value: Self::Elem) -> Result<()>;
}

/// Contract an underlying raw container must satisfy to be wrapped.
///
/// The wrapper layer never copies the container; it delegates through this
/// trait and stays a pure metadata view.
pub trait RawArray: ArrayLike + Sized {
    /// First valid index along `dim` in the container's own numbering.
    ///
    /// 0 for ordinary Rust containers; a non-zero origin is translated
    /// away by the keyed wrapper so its own surface stays 0-based.
    fn origin(&self, dim: usize) -> usize {
        let _ = dim;
        0
    }

    /// Extend the container by one position along `dim`.
    ///
    /// `values` supplies the new hyperslab in row-major order of the other
    /// dimensions; its length must equal the product of the other extents.
    fn append(&mut self, dim: usize, values: Vec<Self::Elem>) -> Result<()>;

    /// Cartesian selection: gather the given positions per dimension.
    ///
    /// [`AxisPick::One`] collapses its dimension out of the result;
    /// [`AxisPick::Many`] retains it with the picked extent. Indices are in
    /// the container's own numbering.
    fn select(&self, picks: &[AxisPick]) -> Result<Self>;
}

/// Result of a key-based get: scalar when every dimension collapsed,
/// otherwise a reduced-rank wrapper carrying its trimmed key sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyGet<E, R> {
    /// Every queried dimension resolved to a single position
    Scalar(E),
    /// At least one dimension was retained
    Reduced(R),
}

impl<E, R> KeyGet<E, R> {
    /// The scalar result, if every dimension collapsed.
    pub fn scalar(self) -> Option<E> {
        match self {
            KeyGet::Scalar(e) => Some(e),
            KeyGet::Reduced(_) => None,
        }
    }

    /// The reduced wrapper, if any dimension was retained.
    pub fn reduced(self) -> Option<R> {
        match self {
            KeyGet::Scalar(_) => None,
            KeyGet::Reduced(r) => Some(r),
        }
    }

    /// True when every dimension collapsed.
    pub fn is_scalar(&self) -> bool {
        matches!(self, KeyGet::Scalar(_))
    }
}

/// The keyed surface: key-based indexing and growth.
pub trait KeyedLike: ArrayLike {
    /// Wrapper type returned by a rank-reducing key query.
    type Reduced: KeyedLike<Elem = Self::Elem>;

    /// Key sequence of one dimension.
    fn axis_keys(&self, dim: usize) -> Result<AxisKeys>;

    /// Key sequences of every dimension, in order.
    fn axes(&self) -> Vec<AxisKeys>;

    /// Resolve one selector against one dimension, without indexing.
    fn resolve(&self, dim: usize, sel: &Selector) -> Result<AxisPick>;

    /// Key-based get: resolve each selector, then gather positionally.
    ///
    /// Scalar selectors collapse their dimension; unspecified trailing
    /// dimensions pass through unchanged. Retained dimensions keep their
    /// key sequences, trimmed to the selection.
    fn get_by_key(&self, queries: Vec<Selector>) -> Result<KeyGet<Self::Elem, Self::Reduced>>;

    /// Growth: append one position along `dim`, extending the array and
    /// its key sequence together.
    ///
    /// Atomic from the caller's perspective: the key extension is prepared
    /// and validated before the array mutation commits, and a failed
    /// append leaves the keys untouched.
    fn push(&mut self, dim: usize, values: Vec<Self::Elem>, new_key: Option<Key>) -> Result<()>;
}

/// The named surface: dimension names, independent of key values.
pub trait NamedLike: ArrayLike {
    /// Dimension names, in order.
    fn names(&self) -> Vec<String>;

    /// Resolve a name to its dimension, by exact match.
    fn dim_index(&self, name: &str) -> Result<usize>;
}

/// Validate a dimension number against a rank.
pub(crate) fn check_dim(dim: usize, rank: usize) -> Result<()> {
    if dim < rank {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds {
            dim,
            index: dim,
            extent: rank,
        })
    }
}

/// Row-major iteration over every index of a shape.
///
/// Rank-0 shapes yield a single empty index; any zero extent yields
/// nothing.
pub fn row_major_indices(shape: &[usize]) -> IndexIter {
    let empty = shape.iter().any(|&e| e == 0);
    IndexIter {
        shape: shape.iter().copied().collect(),
        next: if empty {
            None
        } else {
            Some(shape.iter().map(|_| 0).collect())
        },
    }
}

/// Iterator produced by [`row_major_indices`].
#[derive(Debug, Clone)]
pub struct IndexIter {
    shape: ShapeVec,
    next: Option<ShapeVec>,
}

impl Iterator for IndexIter {
    type Item = ShapeVec;

    fn next(&mut self) -> Option<ShapeVec> {
        let current = self.next.clone()?;
        // advance the odometer from the last dimension inward
        let mut advanced = false;
        let mut next = current.clone();
        for d in (0..self.shape.len()).rev() {
            if next[d] + 1 < self.shape[d] {
                next[d] += 1;
                advanced = true;
                break;
            }
            next[d] = 0;
        }
        self.next = if advanced { Some(next) } else { None };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let all: Vec<Vec<usize>> = row_major_indices(&[2, 3])
            .map(|ix| ix.to_vec())
            .collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn test_rank_zero_yields_one_empty_index() {
        let all: Vec<Vec<usize>> = row_major_indices(&[]).map(|ix| ix.to_vec()).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_zero_extent_yields_nothing() {
        assert_eq!(row_major_indices(&[2, 0, 3]).count(), 0);
    }

    #[test]
    fn test_check_dim() {
        assert!(check_dim(1, 2).is_ok());
        assert!(matches!(
            check_dim(2, 2),
            Err(Error::IndexOutOfBounds { dim: 2, .. })
        ));
    }

    #[test]
    fn test_key_get_accessors() {
        let scalar: KeyGet<i32, ()> = KeyGet::Scalar(5);
        assert!(scalar.is_scalar());
        assert_eq!(scalar.scalar(), Some(5));
        let reduced: KeyGet<i32, &str> = KeyGet::Reduced("sub");
        assert_eq!(reduced.reduced(), Some("sub"));
    }
}
