//! Axle: keyed and named axis metadata for multi-dimensional arrays
//!
//! Axle wraps any N-dimensional container with two kinds of per-dimension
//! metadata, independently or together:
//!
//! - **Keys**: a sequence of key values per dimension, enabling exact,
//!   nearest, interval and predicate lookup, plus growth that extends the
//!   array and its keys in one atomic step.
//! - **Names**: a distinct name per dimension, enabling order-independent
//!   indexing by name.
//!
//! The wrappers are pure metadata views: the container is never copied,
//! and positional indexing passes straight through.
//!
//! # Quick start
//!
//! ```
//! use axle::{cells, select_named, ArrayLike, AxisKeys, AxisSpec, Composite, DenseArray, Selector};
//!
//! # fn main() -> axle::Result<()> {
//! let raw = DenseArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]])?;
//! let a = Composite::new(
//!     raw,
//!     vec![
//!         AxisSpec::named("time").with_keys(AxisKeys::int_range(10, 10, 2)?),
//!         AxisSpec::named("site").with_keys(AxisKeys::values(["a", "b", "c"])),
//!     ],
//! )?;
//!
//! // key-based scalar lookup, addressed by dimension name
//! let v = select_named(
//!     &a,
//!     vec![("site", Selector::exact("b")), ("time", Selector::exact(20i64))],
//! )?;
//! assert_eq!(v.scalar(), Some(5));
//!
//! // interval lookup retains the dimension and trims its keys
//! let sub = select_named(&a, vec![("time", Selector::between(10i64, 15i64))])?
//!     .reduced()
//!     .unwrap();
//! assert_eq!(sub.shape().to_vec(), vec![1, 3]);
//!
//! // flatten to (name, key) records
//! assert_eq!(cells(&a)?.len(), 6);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use axle_core::{
    default_wrap_order, set_default_wrap_order, AxisKeys, AxisPick, Error, IntervalBounds, Key,
    Result, Selector, WrapOrder,
};

pub use axle_array::{
    cells, get_named, push_named, row_major_indices, select_named, ArrayLike, AxisSpec, Cell,
    Composite, DenseArray, KeyGet, KeyedArray, KeyedLike, NamedArray, NamedLike, RawArray,
    ShapeVec,
};
