//! Keyed wrapper
//!
//! [`KeyedArray`] composes a raw array with one ordered key sequence per
//! dimension. Positional indexing passes straight through; key-based
//! indexing resolves selectors through the Key Index and then gathers
//! positionally. The wrapper is a view: it never copies the array it
//! wraps.
//!
//! ## Aliasing
//!
//! A `KeyedArray` is a cheap-clone handle over `Arc<RwLock<..>>`: clones
//! share one underlying array and key-sequence set, so growth through one
//! handle is visible through the others. A single write lock covers both
//! coupled mutations of growth, which keeps them atomic for readers.

use crate::traits::{check_dim, ArrayLike, KeyGet, KeyedLike, NamedLike, RawArray, ShapeVec};
use axle_core::axis::note_adjustment;
use axle_core::error::{Error, Result};
use axle_core::{lookup, AxisKeys, AxisPick, Key, Selector};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

struct Inner<A: RawArray> {
    data: A,
    axes: SmallVec<[AxisKeys; 4]>,
    // first valid raw index per dimension; wrapper indices add this
    origins: SmallVec<[usize; 4]>,
}

/// A raw array plus one key sequence per dimension.
pub struct KeyedArray<A: RawArray> {
    inner: Arc<RwLock<Inner<A>>>,
}

impl<A: RawArray> Clone for KeyedArray<A> {
    fn clone(&self) -> Self {
        KeyedArray {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: RawArray + fmt::Debug> fmt::Debug for KeyedArray<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("KeyedArray")
            .field("data", &inner.data)
            .field("axes", &inner.axes)
            .finish()
    }
}

impl<A: RawArray> KeyedArray<A> {
    /// Wrap a raw array with per-dimension key specifications.
    ///
    /// One entry per dimension: `None` defaults to positional keys, ranges
    /// of the wrong length are reconciled with a warning, general
    /// sequences must match the extent exactly. A non-zero raw index
    /// origin is recorded so the wrapper surface stays 0-based.
    pub fn new(data: A, specs: Vec<Option<AxisKeys>>) -> Result<Self> {
        let rank = data.rank();
        if specs.len() != rank {
            return Err(Error::Arity {
                expected: rank,
                actual: specs.len(),
            });
        }
        let shape = data.shape();
        let mut axes = SmallVec::with_capacity(rank);
        for (dim, spec) in specs.into_iter().enumerate() {
            axes.push(AxisKeys::reconcile(spec, dim, shape[dim])?);
        }
        Ok(Self::wrap_reconciled(data, axes))
    }

    /// Wrap a raw array with explicit keys for every dimension.
    pub fn with_keys(data: A, keys: Vec<AxisKeys>) -> Result<Self> {
        Self::new(data, keys.into_iter().map(Some).collect())
    }

    /// Re-wrap an array with key sequences known to align, without
    /// reconciliation. The unwrap/re-wrap seam for elementwise engines.
    pub fn from_parts(data: A, axes: Vec<AxisKeys>) -> Result<Self> {
        let rank = data.rank();
        if axes.len() != rank {
            return Err(Error::Arity {
                expected: rank,
                actual: axes.len(),
            });
        }
        let shape = data.shape();
        for (dim, keys) in axes.iter().enumerate() {
            if keys.len() != shape[dim] {
                return Err(Error::DimensionMismatch {
                    dim,
                    keys_len: keys.len(),
                    extent: shape[dim],
                });
            }
        }
        Ok(Self::wrap_reconciled(data, axes.into_iter().collect()))
    }

    fn wrap_reconciled(data: A, axes: SmallVec<[AxisKeys; 4]>) -> Self {
        let mut origins = SmallVec::with_capacity(axes.len());
        for dim in 0..axes.len() {
            let origin = data.origin(dim);
            if origin != 0 {
                note_adjustment(dim, &format!("index origin {origin} treated as 0-based"));
            }
            origins.push(origin);
        }
        KeyedArray {
            inner: Arc::new(RwLock::new(Inner {
                data,
                axes,
                origins,
            })),
        }
    }

    /// Snapshot of the wrapped raw array (unwrap for elementwise engines).
    pub fn raw_snapshot(&self) -> A
    where
        A: Clone,
    {
        self.inner.read().data.clone()
    }

    /// Check that two wrappers' key sequences agree, dimension by
    /// dimension, as an elementwise engine must before combining operands.
    pub fn aligned_with(&self, other: &KeyedArray<A>) -> Result<()> {
        let a = self.inner.read();
        let b = other.inner.read();
        if a.axes.len() != b.axes.len() {
            return Err(Error::Arity {
                expected: a.axes.len(),
                actual: b.axes.len(),
            });
        }
        for (dim, (ka, kb)) in a.axes.iter().zip(b.axes.iter()).enumerate() {
            if ka != kb {
                return Err(Error::KeyConflict { dim });
            }
        }
        Ok(())
    }

    fn translate(origins: &[usize], index: &[usize]) -> SmallVec<[usize; 4]> {
        index
            .iter()
            .zip(origins.iter())
            .map(|(&i, &o)| i + o)
            .collect()
    }

    fn check_index(inner: &Inner<A>, index: &[usize]) -> Result<()> {
        if index.len() != inner.axes.len() {
            return Err(Error::Arity {
                expected: inner.axes.len(),
                actual: index.len(),
            });
        }
        for (dim, (&i, keys)) in index.iter().zip(inner.axes.iter()).enumerate() {
            if i >= keys.len() {
                return Err(Error::IndexOutOfBounds {
                    dim,
                    index: i,
                    extent: keys.len(),
                });
            }
        }
        Ok(())
    }
}

impl<A: RawArray> ArrayLike for KeyedArray<A> {
    type Elem = A::Elem;

    fn rank(&self) -> usize {
        self.inner.read().axes.len()
    }

    fn shape(&self) -> ShapeVec {
        self.inner.read().axes.iter().map(AxisKeys::len).collect()
    }

    fn get(&self, index: &[usize]) -> Result<A::Elem> {
        let inner = self.inner.read();
        Self::check_index(&inner, index)?;
        inner.data.get(&Self::translate(&inner.origins, index))
    }

    fn set(&mut self, index: &[usize], value: A::Elem) -> Result<()> {
        let mut inner = self.inner.write();
        Self::check_index(&inner, index)?;
        let raw = Self::translate(&inner.origins, index);
        inner.data.set(&raw, value)
    }
}

impl<A: RawArray> RawArray for KeyedArray<A> {
    // the wrapper surface is always 0-based
    fn origin(&self, _dim: usize) -> usize {
        0
    }

    fn append(&mut self, dim: usize, values: Vec<A::Elem>) -> Result<()> {
        self.push(dim, values, None)
    }

    fn select(&self, picks: &[AxisPick]) -> Result<Self> {
        let inner = self.inner.read();
        if picks.len() != inner.axes.len() {
            return Err(Error::Arity {
                expected: inner.axes.len(),
                actual: picks.len(),
            });
        }
        let mut raw_picks = Vec::with_capacity(picks.len());
        let mut sub_axes: SmallVec<[AxisKeys; 4]> = SmallVec::new();
        for (dim, pick) in picks.iter().enumerate() {
            let origin = inner.origins[dim];
            match pick {
                AxisPick::One(i) => raw_picks.push(AxisPick::One(i + origin)),
                AxisPick::Many(ixs) => {
                    sub_axes.push(inner.axes[dim].subset(dim, ixs)?);
                    raw_picks.push(AxisPick::Many(ixs.iter().map(|&i| i + origin).collect()));
                }
            }
        }
        let sub = inner.data.select(&raw_picks)?;
        Ok(Self::wrap_reconciled(sub, sub_axes))
    }
}

impl<A: RawArray> KeyedLike for KeyedArray<A> {
    type Reduced = KeyedArray<A>;

    fn axis_keys(&self, dim: usize) -> Result<AxisKeys> {
        let inner = self.inner.read();
        check_dim(dim, inner.axes.len())?;
        Ok(inner.axes[dim].clone())
    }

    fn axes(&self) -> Vec<AxisKeys> {
        self.inner.read().axes.to_vec()
    }

    fn resolve(&self, dim: usize, sel: &Selector) -> Result<AxisPick> {
        let inner = self.inner.read();
        check_dim(dim, inner.axes.len())?;
        lookup::resolve(&inner.axes[dim], dim, sel)
    }

    fn get_by_key(&self, queries: Vec<Selector>) -> Result<KeyGet<A::Elem, Self>> {
        let picks = {
            let inner = self.inner.read();
            lookup::resolve_all(&inner.axes, &queries)?
        };
        if picks.iter().all(AxisPick::is_scalar) {
            let index: Vec<usize> = picks
                .iter()
                .map(|pick| match pick {
                    AxisPick::One(i) => *i,
                    AxisPick::Many(_) => unreachable!("all picks are scalar"),
                })
                .collect();
            return Ok(KeyGet::Scalar(self.get(&index)?));
        }
        Ok(KeyGet::Reduced(self.select(&picks)?))
    }

    fn push(&mut self, dim: usize, values: Vec<A::Elem>, new_key: Option<Key>) -> Result<()> {
        let mut inner = self.inner.write();
        check_dim(dim, inner.axes.len())?;
        // prepare the key extension before any mutation commits
        let extended = inner.axes[dim].extended(dim, new_key)?;
        inner.data.append(dim, values)?;
        inner.axes[dim] = extended;
        tracing::debug!(dim, extent = inner.axes[dim].len(), "grew keyed array");
        Ok(())
    }
}

impl<A: RawArray + NamedLike> NamedLike for KeyedArray<A> {
    fn names(&self) -> Vec<String> {
        self.inner.read().data.names()
    }

    fn dim_index(&self, name: &str) -> Result<usize> {
        self.inner.read().data.dim_index(name)
    }
}
