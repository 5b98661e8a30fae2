//! # Named Axes
//!
//! An [`Enumeration`] is a finite, ordered domain of values tagged with a
//! name, so it can serve as one tensor dimension. Positions are dense
//! `0..size`; values need not be unique.
//!
//! The same logical axis often needs several independently indexable copies,
//! e.g. three reference slots when building a permutation of sub-events.
//! [`Enumeration::clone_as`] gives the copy a new name while sharing the
//! value sequence.
//!
//! ```rust
//! use flowcorr_core::enumerate;
//!
//! let reference = enumerate("ref", ["psd1", "psd2", "psd3"]);
//! let second = reference.clone_as("r2");
//! assert_eq!(second.name(), "r2");
//! assert_eq!(*second.at(1).unwrap(), "psd2");
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::{CoreError, Result};
use crate::shape::{TensorAxes, TensorIndex};
use crate::tensor::Tensor;

/// A named, ordered sequence of values.
#[derive(Debug)]
pub struct Enumeration<T> {
    name: String,
    values: Rc<[T]>,
}

/// Build an [`Enumeration`] from a name and an ordered collection.
pub fn enumerate<T, I>(name: impl Into<String>, values: I) -> Enumeration<T>
where
    I: IntoIterator<Item = T>,
{
    Enumeration::new(name, values)
}

impl<T> Enumeration<T> {
    pub fn new<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a linear position.
    pub fn at(&self, position: usize) -> Result<&T> {
        self.values
            .get(position)
            .ok_or_else(|| CoreError::IndexOutOfRange {
                axis: self.name.clone(),
                position: Some(position),
                size: self.values.len(),
            })
    }

    /// Value addressed by this axis's entry in a coordinate.
    pub fn at_index(&self, index: &TensorIndex) -> Result<&T> {
        let position = index
            .get(&self.name)
            .ok_or_else(|| CoreError::IndexOutOfRange {
                axis: self.name.clone(),
                position: None,
                size: self.values.len(),
            })?;
        self.at(position)
    }

    /// Same values, new name.
    pub fn clone_as(&self, new_name: impl Into<String>) -> Self {
        Self {
            name: new_name.into(),
            values: Rc::clone(&self.values),
        }
    }

    /// The one-axis shape `{name: size}`.
    pub fn axes(&self) -> TensorAxes {
        TensorAxes::single(self.name.clone(), self.values.len())
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// First position holding `value`.
    pub fn position_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.values.iter().position(|v| v == value)
    }
}

impl<T: Clone + 'static> Enumeration<T> {
    /// A one-axis tensor whose cell at position `i` is `at(i)`.
    pub fn tensor(&self) -> Tensor<T> {
        let axis = self.clone();
        Tensor::from_parts(self.axes(), self.size(), move |index| {
            axis.at_index(index).cloned()
        })
    }
}

impl<T> Clone for Enumeration<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: Rc::clone(&self.values),
        }
    }
}

impl<'a, T> IntoIterator for &'a Enumeration<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Enumeration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.name,
            self.values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_preserves_order_and_duplicates() {
        let e = enumerate("component", ["x", "y", "x"]);
        assert_eq!(e.size(), 3);
        assert_eq!(*e.at(0).unwrap(), "x");
        assert_eq!(*e.at(2).unwrap(), "x");
        assert_eq!(e.position_of(&"y"), Some(1));
    }

    #[test]
    fn test_at_out_of_range() {
        let e = enumerate("ref", ["psd1"]);
        let err = e.at(1).unwrap_err();
        assert_eq!(
            err,
            CoreError::IndexOutOfRange {
                axis: "ref".into(),
                position: Some(1),
                size: 1
            }
        );
    }

    #[test]
    fn test_at_index_reads_own_axis_only() {
        let e = enumerate("ref", ["psd1", "psd2", "psd3"]);
        let idx = TensorIndex::from([("ref", 2), ("component", 0)]);
        assert_eq!(*e.at_index(&idx).unwrap(), "psd3");

        let missing = TensorIndex::from([("component", 0)]);
        assert!(e.at_index(&missing).is_err());
    }

    #[test]
    fn test_clone_as_shares_values() {
        let e = enumerate("ref", ["psd1", "psd2", "psd3"]);
        let r2 = e.clone_as("r2");
        assert_eq!(r2.name(), "r2");
        assert_eq!(e.name(), "ref");
        assert_eq!(r2.values(), e.values());
        assert_eq!(r2.axes(), TensorAxes::from([("r2", 3)]));
    }

    #[test]
    fn test_tensor() {
        let e = enumerate("ref", ["psd1", "psd2"]);
        let t = e.tensor();
        assert_eq!(t.axes(), &TensorAxes::from([("ref", 2)]));
        assert_eq!(t.at_linear(1).unwrap(), "psd2");
    }

    #[test]
    fn test_display() {
        let e = enumerate("ref", ["psd1", "psd2"]);
        assert_eq!(e.to_string(), "ref[psd1, psd2]");
    }
}
