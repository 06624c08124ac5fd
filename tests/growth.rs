//! Growth postconditions across the wrapper stack

use axle::{
    push_named, select_named, ArrayLike, AxisKeys, AxisSpec, Composite, DenseArray, Error, Key,
    KeyedArray, KeyedLike, Selector,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn push_extends_data_and_keys_together() {
    init_tracing();
    let raw = DenseArray::from_vec(vec![1, 2, 3]);
    let mut a =
        KeyedArray::with_keys(raw, vec![AxisKeys::int_range(0, 10, 3).unwrap()]).unwrap();
    a.push(0, vec![4], None).unwrap();
    assert_eq!(a.extent(0), 4);
    assert_eq!(a.get(&[3]).unwrap(), 4);
    // range keys keep their closed-form representation after growth
    assert_eq!(a.axis_keys(0).unwrap(), AxisKeys::int_range(0, 10, 4).unwrap());
    assert_eq!(
        a.get_by_key(vec![Selector::exact(30i64)]).unwrap().scalar(),
        Some(4)
    );
}

#[test]
fn float_range_growth_appends_next_step() {
    let raw = DenseArray::from_vec(vec![10, 20, 30]);
    let mut a =
        KeyedArray::with_keys(raw, vec![AxisKeys::float_range(0.0, 0.5, 3).unwrap()]).unwrap();
    a.push(0, vec![40], None).unwrap();
    assert_eq!(a.axis_keys(0).unwrap().at(3), Some(Key::Float(1.5)));
    assert_eq!(
        a.get_by_key(vec![Selector::exact(1.5)]).unwrap().scalar(),
        Some(40)
    );
}

#[test]
fn general_keys_require_explicit_new_key() {
    let raw = DenseArray::from_vec(vec![1, 2]);
    let mut a = KeyedArray::with_keys(raw, vec![AxisKeys::values(["a", "b"])]).unwrap();
    assert_eq!(
        a.push(0, vec![3], None).unwrap_err(),
        Error::UnextendableKeys { dim: 0 }
    );
    // the failed push left both the data and the keys untouched
    assert_eq!(a.extent(0), 2);
    assert_eq!(a.axis_keys(0).unwrap(), AxisKeys::values(["a", "b"]));

    a.push(0, vec![3], Some(Key::from("c"))).unwrap();
    assert_eq!(a.extent(0), 3);
    assert_eq!(
        a.get_by_key(vec![Selector::exact("c")]).unwrap().scalar(),
        Some(3)
    );
}

#[test]
fn failed_data_append_leaves_keys_untouched() {
    let raw = DenseArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let mut a = KeyedArray::with_keys(
        raw,
        vec![
            AxisKeys::int_range(0, 1, 2).unwrap(),
            AxisKeys::values(["a", "b", "c"]),
        ],
    )
    .unwrap();
    // wrong hyperslab size for dimension 0
    assert!(matches!(
        a.push(0, vec![7], None),
        Err(Error::ShapeMismatch { .. })
    ));
    assert_eq!(a.shape().to_vec(), vec![2, 3]);
    assert_eq!(a.axis_keys(0).unwrap().len(), 2);
}

#[test]
fn growth_is_visible_through_aliases() {
    let raw = DenseArray::from_vec(vec![1, 2]);
    let mut a =
        KeyedArray::with_keys(raw, vec![AxisKeys::int_range(0, 1, 2).unwrap()]).unwrap();
    let alias = a.clone();
    a.push(0, vec![3], None).unwrap();
    // data and keys moved together from the alias's point of view
    assert_eq!(alias.extent(0), 3);
    assert_eq!(alias.get(&[2]).unwrap(), 3);
    assert_eq!(
        alias
            .get_by_key(vec![Selector::exact(2i64)])
            .unwrap()
            .scalar(),
        Some(3)
    );
}

#[test]
fn range_reconciliation_adjusts_to_extent() {
    init_tracing();
    // a range of the wrong length is adjusted (with a warning), then grows
    // like any other range
    let raw = DenseArray::from_vec(vec![1, 2, 3]);
    let mut a =
        KeyedArray::with_keys(raw, vec![AxisKeys::int_range(0, 5, 99).unwrap()]).unwrap();
    assert_eq!(a.axis_keys(0).unwrap(), AxisKeys::int_range(0, 5, 3).unwrap());
    a.push(0, vec![4], None).unwrap();
    assert_eq!(
        a.get_by_key(vec![Selector::exact(15i64)]).unwrap().scalar(),
        Some(4)
    );
}

#[test]
fn growth_along_inner_dimension_of_matrix() {
    let raw = DenseArray::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let mut a = Composite::new(
        raw,
        vec![
            AxisSpec::named("row").with_keys(AxisKeys::int_range(0, 1, 2).unwrap()),
            AxisSpec::named("col").with_keys(AxisKeys::values(["a", "b"])),
        ],
    )
    .unwrap();
    push_named(&mut a, "col", vec![5, 6], Some(Key::from("c"))).unwrap();
    assert_eq!(a.shape().to_vec(), vec![2, 3]);
    // new column cells land at [.., 2] in row order
    assert_eq!(a.get(&[0, 2]).unwrap(), 5);
    assert_eq!(a.get(&[1, 2]).unwrap(), 6);
    // old cells are untouched
    assert_eq!(a.get(&[1, 1]).unwrap(), 4);
    let got = select_named(
        &a,
        vec![
            ("col", Selector::exact("c")),
            ("row", Selector::exact(1i64)),
        ],
    )
    .unwrap();
    assert_eq!(got.scalar(), Some(6));
}
