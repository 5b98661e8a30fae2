//! # Error Types
//!
//! Errors in the tensor core are structural: they mean axes were composed
//! incorrectly. Two tensors that disagree on the size of a commonly named
//! axis cannot be broadcast, and a coordinate that misses an axis cannot
//! address a cell. Neither is recoverable by retrying, so both surface
//! immediately to the caller.

use thiserror::Error;

/// Core errors for named-axis tensor composition and lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Two shapes disagree on the size of an axis they both name.
    #[error("Axis mismatch on '{axis}': size {left} vs {right}")]
    AxisMismatch {
        axis: String,
        left: usize,
        right: usize,
    },

    /// A coordinate is missing a required axis or lies outside its size.
    ///
    /// `position` is `None` when the axis is absent from the coordinate.
    #[error("{}", describe_out_of_range(.axis, .position, .size))]
    IndexOutOfRange {
        axis: String,
        position: Option<usize>,
        size: usize,
    },

    /// A linear index is not below the tensor size.
    #[error("Linear index {index} out of range for tensor of size {size}")]
    LinearIndexOutOfRange { index: usize, size: usize },

    /// A reduction named an axis the tensor does not have.
    #[error("Unknown axis '{axis}'")]
    UnknownAxis { axis: String },

    /// The product of the axis sizes does not fit in `usize`.
    #[error("Shape {shape} has too many cells to index")]
    ShapeTooLarge { shape: String },
}

impl CoreError {
    /// The axis name this error refers to, if any.
    pub fn axis(&self) -> Option<&str> {
        match self {
            CoreError::AxisMismatch { axis, .. }
            | CoreError::IndexOutOfRange { axis, .. }
            | CoreError::UnknownAxis { axis } => Some(axis),
            CoreError::LinearIndexOutOfRange { .. } | CoreError::ShapeTooLarge { .. } => None,
        }
    }
}

fn describe_out_of_range(axis: &str, position: &Option<usize>, size: &usize) -> String {
    match position {
        Some(p) => format!("Index {p} out of range on axis '{axis}' (size {size})"),
        None => format!("Coordinate is missing axis '{axis}' (size {size})"),
    }
}

/// Result alias used across the core.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_mismatch_display() {
        let err = CoreError::AxisMismatch {
            axis: "a".into(),
            left: 10,
            right: 20,
        };
        assert_eq!(err.to_string(), "Axis mismatch on 'a': size 10 vs 20");
        assert_eq!(err.axis(), Some("a"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let missing = CoreError::IndexOutOfRange {
            axis: "component".into(),
            position: None,
            size: 2,
        };
        assert!(missing.to_string().contains("missing axis 'component'"));

        let beyond = CoreError::IndexOutOfRange {
            axis: "component".into(),
            position: Some(5),
            size: 2,
        };
        assert!(beyond.to_string().contains("Index 5"));
    }

    #[test]
    fn test_linear_index_has_no_axis() {
        let err = CoreError::LinearIndexOutOfRange { index: 7, size: 6 };
        assert_eq!(err.axis(), None);
    }
}
