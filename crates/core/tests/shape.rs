//! # Shape Tests
//!
//! Tests for the named-axis shape model:
//! - Size law and scalar shapes
//! - Merge by name and mismatch detection
//! - Linear index encoding in both directions
//! - Splitting a shape for partial reduction

use flowcorr_core::{merge_axes, CoreError, TensorAxes, TensorIndex};

// ============================================================================
// Size Tests
// ============================================================================

#[test]
fn test_size_is_product_of_axis_sizes() {
    let axes = TensorAxes::from([("x", 3), ("y", 2), ("z", 4)]);
    assert_eq!(axes.rank(), 3);
    assert_eq!(axes.numel().unwrap(), 24);
}

#[test]
fn test_scalar_shape_has_one_cell() {
    let axes = TensorAxes::scalar();
    assert!(axes.is_scalar());
    assert_eq!(axes.rank(), 0);
    assert_eq!(axes.numel().unwrap(), 1);
    assert_eq!(axes.decode(0).unwrap(), TensorIndex::new());
}

#[test]
fn test_zero_sized_axis_has_no_cells() {
    let axes = TensorAxes::from([("a", 0), ("b", 3)]);
    assert_eq!(axes.numel().unwrap(), 0);
    assert!(matches!(
        axes.decode(0),
        Err(CoreError::LinearIndexOutOfRange { index: 0, size: 0 })
    ));
}

#[test]
fn test_cell_count_overflow_is_reported() {
    let axes = TensorAxes::from([("a", usize::MAX / 2), ("b", 4)]);
    assert!(matches!(axes.numel(), Err(CoreError::ShapeTooLarge { .. })));
    let index = TensorIndex::from([("a", usize::MAX / 2 - 1), ("b", 3)]);
    assert!(matches!(
        axes.encode(&index),
        Err(CoreError::ShapeTooLarge { .. })
    ));
}

// ============================================================================
// Merge Tests
// ============================================================================

#[test]
fn test_merge_unions_axes() {
    let merged = merge_axes([
        &TensorAxes::from([("a", 10)]),
        &TensorAxes::from([("a", 10)]),
        &TensorAxes::from([("b", 5)]),
    ])
    .unwrap();
    assert_eq!(merged, TensorAxes::from([("a", 10), ("b", 5)]));
}

#[test]
fn test_merge_mismatch() {
    let err = TensorAxes::from([("a", 10)])
        .merge(&TensorAxes::from([("a", 20)]))
        .unwrap_err();
    assert_eq!(
        err,
        CoreError::AxisMismatch {
            axis: "a".to_string(),
            left: 10,
            right: 20
        }
    );
    assert_eq!(err.axis(), Some("a"));
    assert_eq!(err.to_string(), "Axis mismatch on 'a': size 10 vs 20");
}

#[test]
fn test_merge_mismatch_anywhere_in_list() {
    let shapes = [
        TensorAxes::from([("a", 2)]),
        TensorAxes::from([("b", 3)]),
        TensorAxes::from([("b", 4), ("c", 1)]),
    ];
    let err = merge_axes(shapes.iter()).unwrap_err();
    assert_eq!(err.axis(), Some("b"));
}

#[test]
fn test_merge_with_scalar_is_identity() {
    let axes = TensorAxes::from([("ref", 3), ("component", 2)]);
    assert_eq!(axes.merge(&TensorAxes::scalar()).unwrap(), axes);
    assert_eq!(TensorAxes::scalar().merge(&axes).unwrap(), axes);
}

// ============================================================================
// Linear Index Tests
// ============================================================================

#[test]
fn test_first_axis_varies_slowest() {
    let axes = TensorAxes::from([("b", 2), ("a", 3)]);
    // names are key-sorted: a then b
    assert_eq!(axes.decode(0).unwrap(), TensorIndex::from([("a", 0), ("b", 0)]));
    assert_eq!(axes.decode(1).unwrap(), TensorIndex::from([("a", 0), ("b", 1)]));
    assert_eq!(axes.decode(2).unwrap(), TensorIndex::from([("a", 1), ("b", 0)]));
    assert_eq!(axes.decode(5).unwrap(), TensorIndex::from([("a", 2), ("b", 1)]));
}

#[test]
fn test_encode_ignores_extra_axes() {
    let axes = TensorAxes::from([("a", 3)]);
    let index = TensorIndex::from([("a", 2), ("unrelated", 7)]);
    assert_eq!(axes.encode(&index).unwrap(), 2);
}

#[test]
fn test_encode_missing_axis() {
    let axes = TensorAxes::from([("a", 3), ("b", 2)]);
    let err = axes.encode(&TensorIndex::from([("a", 1)])).unwrap_err();
    assert_eq!(
        err,
        CoreError::IndexOutOfRange {
            axis: "b".to_string(),
            position: None,
            size: 2
        }
    );
    assert_eq!(err.to_string(), "Coordinate is missing axis 'b' (size 2)");
}

#[test]
fn test_encode_out_of_range() {
    let axes = TensorAxes::from([("a", 3)]);
    let err = axes.encode(&TensorIndex::from([("a", 3)])).unwrap_err();
    assert_eq!(err.to_string(), "Index 3 out of range on axis 'a' (size 3)");
}

// ============================================================================
// Split Tests
// ============================================================================

#[test]
fn test_split_selects_named_axes() {
    let axes = TensorAxes::from([("a", 3), ("b", 2), ("c", 4)]);
    let (selected, rest) = axes.split(&["b"]).unwrap();
    assert_eq!(selected, TensorAxes::from([("b", 2)]));
    assert_eq!(rest, TensorAxes::from([("a", 3), ("c", 4)]));
}

#[test]
fn test_split_unknown_axis() {
    let axes = TensorAxes::from([("a", 3)]);
    assert_eq!(
        axes.split(&["z"]).unwrap_err(),
        CoreError::UnknownAxis {
            axis: "z".to_string()
        }
    );
}

// ============================================================================
// Display Tests
// ============================================================================

#[test]
fn test_display() {
    let axes = TensorAxes::from([("b", 2), ("a", 3)]);
    assert_eq!(axes.to_string(), "{a: 3, b: 2}");
    let index = TensorIndex::from([("b", 1), ("a", 0)]);
    assert_eq!(index.to_string(), "{a=0, b=1}");
}
