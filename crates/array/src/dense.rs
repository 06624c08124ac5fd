//! Dense reference array
//!
//! [`DenseArray`] is the reference implementation of the [`RawArray`]
//! collaborator contract: a row-major `Vec` with a shape. Tests, docs and
//! callers without their own container use it; the wrapper layer itself
//! only ever speaks to the trait.

use crate::traits::{check_dim, row_major_indices, ArrayLike, RawArray, ShapeVec};
use axle_core::error::{Error, Result};
use axle_core::AxisPick;
use serde::{Deserialize, Serialize};

/// Row-major N-dimensional array with 0-based indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseArray<T> {
    shape: ShapeVec,
    data: Vec<T>,
}

impl<T: Clone> DenseArray<T> {
    /// Build from a shape and row-major elements.
    pub fn new(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(DenseArray {
            shape: shape.iter().copied().collect(),
            data,
        })
    }

    /// Build a rank-1 array from a vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        DenseArray {
            shape: ShapeVec::from_slice(&[data.len()]),
            data,
        }
    }

    /// Build a rank-2 array from rows. Rows must be equal length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(Error::ShapeMismatch {
                    expected: ncols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(DenseArray {
            shape: ShapeVec::from_slice(&[nrows, ncols]),
            data,
        })
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.shape.len() {
            return Err(Error::Arity {
                expected: self.shape.len(),
                actual: index.len(),
            });
        }
        let mut offset = 0;
        for (dim, (&i, &extent)) in index.iter().zip(self.shape.iter()).enumerate() {
            if i >= extent {
                return Err(Error::IndexOutOfBounds {
                    dim,
                    index: i,
                    extent,
                });
            }
            offset = offset * extent + i;
        }
        Ok(offset)
    }
}

impl<T: Clone> ArrayLike for DenseArray<T> {
    type Elem = T;

    fn rank(&self) -> usize {
        self.shape.len()
    }

    fn shape(&self) -> ShapeVec {
        self.shape.clone()
    }

    fn get(&self, index: &[usize]) -> Result<T> {
        let offset = self.offset(index)?;
        Ok(self.data[offset].clone())
    }

    fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let offset = self.offset(index)?;
        self.data[offset] = value;
        Ok(())
    }
}

impl<T: Clone> RawArray for DenseArray<T> {
    fn append(&mut self, dim: usize, values: Vec<T>) -> Result<()> {
        check_dim(dim, self.rank())?;
        let expected: usize = self
            .shape
            .iter()
            .enumerate()
            .filter(|(d, _)| *d != dim)
            .map(|(_, &e)| e)
            .product();
        if values.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        if dim == 0 {
            // leading dimension extends contiguously in row-major order
            self.data.extend(values);
            self.shape[0] += 1;
            return Ok(());
        }
        let old_extent = self.shape[dim];
        let mut new_shape = self.shape.clone();
        new_shape[dim] += 1;
        let mut new_data = Vec::with_capacity(self.data.len() + values.len());
        let mut fresh = values.into_iter();
        for index in row_major_indices(&new_shape) {
            if index[dim] < old_extent {
                let offset = self.offset(&index)?;
                new_data.push(self.data[offset].clone());
            } else {
                // row-major iteration visits the new cells in row-major
                // order of the other dimensions
                match fresh.next() {
                    Some(v) => new_data.push(v),
                    None => unreachable!("value count validated above"),
                }
            }
        }
        self.shape = new_shape;
        self.data = new_data;
        Ok(())
    }

    fn select(&self, picks: &[AxisPick]) -> Result<Self> {
        if picks.len() != self.rank() {
            return Err(Error::Arity {
                expected: self.rank(),
                actual: picks.len(),
            });
        }
        let mut lists: Vec<Vec<usize>> = Vec::with_capacity(picks.len());
        for (dim, pick) in picks.iter().enumerate() {
            let indices = pick.indices();
            for &i in &indices {
                if i >= self.shape[dim] {
                    return Err(Error::IndexOutOfBounds {
                        dim,
                        index: i,
                        extent: self.shape[dim],
                    });
                }
            }
            lists.push(indices);
        }
        let out_shape: ShapeVec = picks
            .iter()
            .zip(lists.iter())
            .filter(|(pick, _)| !pick.is_scalar())
            .map(|(_, list)| list.len())
            .collect();
        let grid: ShapeVec = lists.iter().map(Vec::len).collect();
        let mut data = Vec::with_capacity(grid.iter().product());
        let mut index = vec![0usize; self.rank()];
        for combo in row_major_indices(&grid) {
            for (d, &pos) in combo.iter().enumerate() {
                index[d] = lists[d][pos];
            }
            let offset = self.offset(&index)?;
            data.push(self.data[offset].clone());
        }
        DenseArray::new(&out_shape, data)
    }
}
