//! Axis-metadata wrappers over multi-dimensional arrays
//!
//! This crate layers two kinds of per-dimension metadata over any
//! container implementing [`RawArray`]:
//!
//! - [`KeyedArray`]: a key sequence per dimension, enabling key-based
//!   lookup (exact, nearest, interval, predicate) and coordinated growth.
//! - [`NamedArray`]: a name per dimension, enabling order-independent
//!   name-qualified indexing.
//! - [`Composite`]: both at once, in either nesting order, with identical
//!   observable behavior.
//!
//! [`DenseArray`] is the bundled reference container; the wrappers only
//! ever speak to the [`RawArray`] trait, so caller-owned containers plug
//! in the same way.
//!
//! Key resolution itself lives in `axle-core`; this crate binds it to
//! array positions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compose;
pub mod dense;
pub mod keyed;
pub mod named;
pub mod table;
pub mod traits;

pub use compose::{get_named, push_named, select_named, AxisSpec, Composite};
pub use dense::DenseArray;
pub use keyed::KeyedArray;
pub use named::NamedArray;
pub use table::{cells, Cell};
pub use traits::{
    row_major_indices, ArrayLike, IndexIter, KeyGet, KeyedLike, NamedLike, RawArray, ShapeVec,
};
