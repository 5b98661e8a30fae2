//! # Shapes and Coordinates
//!
//! A shape ([`TensorAxes`]) maps axis names to sizes; a coordinate
//! ([`TensorIndex`]) maps axis names to positions. Both are keyed by name,
//! never by position: two tensors line up because they *name* the same axis,
//! not because it happens to sit in the same slot.
//!
//! ## Broadcasting
//!
//! [`TensorAxes::merge`] is the only broadcasting rule in the engine. The
//! result holds every axis of both inputs; an axis named on both sides must
//! have the same size, otherwise the merge fails with
//! [`CoreError::AxisMismatch`].
//!
//! ```rust
//! use flowcorr_core::shape::{merge_axes, TensorAxes};
//!
//! let a = TensorAxes::from([("a", 10)]);
//! let b = TensorAxes::from([("b", 5)]);
//! let merged = merge_axes([&a, &a, &b]).unwrap();
//! assert_eq!(merged.rank(), 2);
//!
//! let clash = TensorAxes::from([("a", 20)]);
//! assert!(a.merge(&clash).is_err());
//! ```
//!
//! ## Linear order
//!
//! Axis names are kept key-sorted. A linear index enumerates coordinates with
//! the first name varying slowest and the last name fastest.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, Result};

/// Mapping from axis name to axis size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TensorAxes {
    sizes: BTreeMap<String, usize>,
}

impl TensorAxes {
    /// The empty shape of a scalar tensor.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// A single-axis shape.
    pub fn single(name: impl Into<String>, size: usize) -> Self {
        let mut sizes = BTreeMap::new();
        sizes.insert(name.into(), size);
        Self { sizes }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    /// Whether this is the shape of a scalar (no axes).
    pub fn is_scalar(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Total number of cells; 1 for the empty shape.
    ///
    /// Fails with [`CoreError::ShapeTooLarge`] if the product of the sizes
    /// does not fit in `usize`. A zero-sized axis makes the count 0 however
    /// large the others are.
    pub fn numel(&self) -> Result<usize> {
        if self.sizes.values().any(|&size| size == 0) {
            return Ok(0);
        }
        self.sizes
            .values()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size))
            .ok_or_else(|| CoreError::ShapeTooLarge {
                shape: self.to_string(),
            })
    }

    /// Size of the named axis.
    pub fn size_of(&self, name: &str) -> Option<usize> {
        self.sizes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sizes.contains_key(name)
    }

    /// Axis names in linear order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sizes.keys().map(String::as_str)
    }

    /// `(name, size)` pairs in linear order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.sizes.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Merge two shapes by axis name.
    ///
    /// Fails with [`CoreError::AxisMismatch`] if an axis appears on both
    /// sides with different sizes.
    pub fn merge(&self, other: &TensorAxes) -> Result<TensorAxes> {
        let mut sizes = self.sizes.clone();
        for (name, &size) in &other.sizes {
            match sizes.get(name) {
                Some(&existing) if existing != size => {
                    tracing::debug!(axis = %name, left = existing, right = size, "axis mismatch");
                    return Err(CoreError::AxisMismatch {
                        axis: name.clone(),
                        left: existing,
                        right: size,
                    });
                }
                Some(_) => {}
                None => {
                    sizes.insert(name.clone(), size);
                }
            }
        }
        Ok(TensorAxes { sizes })
    }

    /// Split into `(selected, remainder)` where `selected` holds the named
    /// axes. Every name must be an axis of this shape.
    pub fn split<S: AsRef<str>>(&self, names: &[S]) -> Result<(TensorAxes, TensorAxes)> {
        let mut selected = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let size = self.size_of(name).ok_or_else(|| CoreError::UnknownAxis {
                axis: name.to_string(),
            })?;
            selected.insert(name.to_string(), size);
        }
        let remainder = self
            .sizes
            .iter()
            .filter(|(k, _)| !selected.contains_key(*k))
            .map(|(k, &v)| (k.clone(), v))
            .collect();
        Ok((TensorAxes { sizes: selected }, TensorAxes { sizes: remainder }))
    }

    /// Encode a coordinate as a linear index.
    ///
    /// Every axis of this shape must be present and in range; entries for
    /// other axes are ignored.
    pub fn encode(&self, index: &TensorIndex) -> Result<usize> {
        let mut linear = 0usize;
        for (name, &size) in &self.sizes {
            let position = self.checked_position(index, name, size)?;
            linear = linear
                .checked_mul(size)
                .and_then(|l| l.checked_add(position))
                .ok_or_else(|| CoreError::ShapeTooLarge {
                    shape: self.to_string(),
                })?;
        }
        Ok(linear)
    }

    /// Decode a linear index into a coordinate over exactly this shape's axes.
    pub fn decode(&self, linear: usize) -> Result<TensorIndex> {
        let numel = self.numel()?;
        if linear >= numel {
            return Err(CoreError::LinearIndexOutOfRange {
                index: linear,
                size: numel,
            });
        }
        let mut positions = BTreeMap::new();
        let mut rest = linear;
        for (name, &size) in self.sizes.iter().rev() {
            positions.insert(name.clone(), rest % size);
            rest /= size;
        }
        Ok(TensorIndex { positions })
    }

    /// Check that `index` addresses a valid cell of this shape.
    pub fn validate(&self, index: &TensorIndex) -> Result<()> {
        for (name, &size) in &self.sizes {
            self.checked_position(index, name, size)?;
        }
        Ok(())
    }

    fn checked_position(&self, index: &TensorIndex, name: &str, size: usize) -> Result<usize> {
        match index.get(name) {
            Some(p) if p < size => Ok(p),
            position => Err(CoreError::IndexOutOfRange {
                axis: name.to_string(),
                position,
                size,
            }),
        }
    }
}

impl<S: Into<String>, const N: usize> From<[(S, usize); N]> for TensorAxes {
    fn from(pairs: [(S, usize); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TensorAxes {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for TensorAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.sizes
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Merge any number of shapes.
///
/// The fold is pairwise from the left. If any two inputs disagree on an
/// axis, the merge fails: by the time the later of the two is folded in, the
/// accumulator already carries the earlier size for that axis.
pub fn merge_axes<'a, I>(shapes: I) -> Result<TensorAxes>
where
    I: IntoIterator<Item = &'a TensorAxes>,
{
    shapes
        .into_iter()
        .try_fold(TensorAxes::scalar(), |acc, shape| acc.merge(shape))
}

/// Mapping from axis name to position.
///
/// A coordinate may name axes a tensor does not have; lookups only consult
/// the axes of the tensor being addressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorIndex {
    positions: BTreeMap<String, usize>,
}

impl TensorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position along the named axis.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Builder-style insertion.
    pub fn with(mut self, name: impl Into<String>, position: usize) -> Self {
        self.positions.insert(name.into(), position);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, position: usize) {
        self.positions.insert(name.into(), position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Union of two coordinates; entries of `other` win on shared names.
    pub fn merged_with(&self, other: &TensorIndex) -> TensorIndex {
        let mut positions = self.positions.clone();
        positions.extend(other.positions.iter().map(|(k, &v)| (k.clone(), v)));
        TensorIndex { positions }
    }
}

impl<S: Into<String>, const N: usize> From<[(S, usize); N]> for TensorIndex {
    fn from(pairs: [(S, usize); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TensorIndex {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl fmt::Display for TensorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.positions
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
