//! Flat table adapter
//!
//! Flattens a keyed + named array into one record per element, each
//! carrying its full `(name, key)` coordinate vector. The output is
//! row-major and serializes cleanly, so it feeds tabular sinks (CSV
//! writers, dataframes, JSON) without those sinks knowing anything about
//! the wrapper layers.

use crate::traits::{row_major_indices, ArrayLike, KeyedLike, NamedLike};
use axle_core::error::{Error, Result};
use axle_core::Key;
use serde::Serialize;

/// One element of a keyed + named array with its full coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell<E> {
    /// `(dimension name, key)` per dimension, in dimension order.
    pub coords: Vec<(String, Key)>,
    /// The element at those coordinates.
    pub value: E,
}

/// Flatten into one [`Cell`] per element, in row-major order.
pub fn cells<T: KeyedLike + NamedLike>(a: &T) -> Result<Vec<Cell<T::Elem>>> {
    let names = a.names();
    let axes = a.axes();
    let shape = a.shape();
    let mut out = Vec::with_capacity(shape.iter().product());
    for index in row_major_indices(&shape) {
        let mut coords = Vec::with_capacity(index.len());
        for (dim, &i) in index.iter().enumerate() {
            let key = axes[dim].at(i).ok_or(Error::IndexOutOfBounds {
                dim,
                index: i,
                extent: axes[dim].len(),
            })?;
            coords.push((names[dim].clone(), key));
        }
        out.push(Cell {
            coords,
            value: a.get(&index)?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{AxisSpec, Composite};
    use crate::dense::DenseArray;
    use axle_core::AxisKeys;

    fn sample() -> Composite<DenseArray<i32>> {
        let raw = DenseArray::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        Composite::new(
            raw,
            vec![
                AxisSpec::named("row").with_keys(AxisKeys::int_range(10, 10, 2).unwrap()),
                AxisSpec::named("col").with_keys(AxisKeys::values(["a", "b"])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cells_row_major_with_coords() {
        let all = cells(&sample()).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(
            all[0].coords,
            vec![
                ("row".to_string(), Key::Int(10)),
                ("col".to_string(), Key::Str("a".into()))
            ]
        );
        assert_eq!(all[0].value, 1);
        assert_eq!(
            all[3].coords,
            vec![
                ("row".to_string(), Key::Int(20)),
                ("col".to_string(), Key::Str("b".into()))
            ]
        );
        assert_eq!(all[3].value, 4);
    }

    #[test]
    fn test_cells_empty_dimension() {
        let raw = DenseArray::new(&[0], Vec::<i32>::new()).unwrap();
        let a = Composite::new(raw, vec![AxisSpec::named("t")]).unwrap();
        assert!(cells(&a).unwrap().is_empty());
    }

    #[test]
    fn test_cells_serialize() {
        let all = cells(&sample()).unwrap();
        let json = serde_json::to_value(&all[0]).unwrap();
        assert_eq!(json["value"], 1);
        assert_eq!(json["coords"][0][0], "row");
    }
}
