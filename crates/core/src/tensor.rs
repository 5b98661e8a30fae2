//! # Tensors over Named Axes
//!
//! A [`Tensor`] is a shape plus a factory from coordinate to value. Nothing
//! is stored: every cell is computed on demand by calling the factory, so a
//! tensor of lazy expressions stays lazy until a consumer asks for a cell.
//!
//! ## Composition
//!
//! Tensors are immutable. Arithmetic, [`Tensor::map`] and the reductions all
//! return new tensors whose factories close over their operands.
//!
//! ```text
//!    ref ──┐
//!          ├── apply_binary ──── {component, ref}
//!    component ──┘
//! ```
//!
//! [`Tensor::apply_binary`] merges the two shapes by axis name and hands the
//! *same* merged coordinate to both operands. That works because
//! [`Tensor::at`] only reads the axes of its own shape; the extra entries
//! are ignored.
//!
//! ## Example
//!
//! ```rust
//! use flowcorr_core::{enumerate, Tensor, TensorAxes};
//!
//! let a = enumerate("a", [1.0, 2.0, 3.0]);
//! let b = enumerate("b", [10.0, 20.0]);
//!
//! let product = (a.tensor() * &b).unwrap();
//! assert_eq!(product.axes(), &TensorAxes::from([("a", 3), ("b", 2)]));
//! assert_eq!(product.size(), 6);
//!
//! // Contract over "b": sum of each row
//! let rows = product.accumulate_axes(&["b"], 0.0, |acc, x| acc + x).unwrap();
//! let total: Vec<f64> = rows.materialize().unwrap();
//! assert_eq!(total, vec![30.0, 60.0, 90.0]);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::shape::{merge_axes, TensorAxes, TensorIndex};
use crate::tensorize::Tensorize;

type Factory<T> = Rc<dyn Fn(&TensorIndex) -> Result<T>>;

/// A named-axis array defined by a shape and a factory.
pub struct Tensor<T> {
    axes: TensorAxes,
    size: usize,
    factory: Factory<T>,
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            axes: self.axes.clone(),
            size: self.size,
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor").field("axes", &self.axes).finish_non_exhaustive()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<T: 'static> Tensor<T> {
    /// Create a tensor from an infallible factory.
    ///
    /// Fails with [`CoreError::ShapeTooLarge`](crate::CoreError::ShapeTooLarge)
    /// if the cell count of `axes` does not fit in `usize`.
    pub fn new<F>(axes: TensorAxes, factory: F) -> Result<Self>
    where
        F: Fn(&TensorIndex) -> T + 'static,
    {
        Self::fallible(axes, move |index| Ok(factory(index)))
    }

    /// Create a tensor whose factory may fail with a structural error.
    pub fn fallible<F>(axes: TensorAxes, factory: F) -> Result<Self>
    where
        F: Fn(&TensorIndex) -> Result<T> + 'static,
    {
        let size = axes.numel()?;
        Ok(Self::from_parts(axes, size, factory))
    }

    /// A 0-axis tensor that always yields `value`.
    pub fn scalar(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_parts(TensorAxes::scalar(), 1, move |_| Ok(value.clone()))
    }

    /// `size` must be the cell count of `axes`.
    pub(crate) fn from_parts<F>(axes: TensorAxes, size: usize, factory: F) -> Self
    where
        F: Fn(&TensorIndex) -> Result<T> + 'static,
    {
        Self {
            axes,
            size,
            factory: Rc::new(factory),
        }
    }
}

// ============================================================================
// Shape and indexing
// ============================================================================

impl<T> Tensor<T> {
    pub fn axes(&self) -> &TensorAxes {
        &self.axes
    }

    /// Number of cells; 1 for a scalar tensor.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rank(&self) -> usize {
        self.axes.rank()
    }

    /// Decode a linear index. Never fails for `i < size()`.
    pub fn coordinate(&self, linear: usize) -> Result<TensorIndex> {
        self.axes.decode(linear)
    }

    /// Encode a coordinate. Extra axis entries are ignored.
    pub fn linear_index(&self, index: &TensorIndex) -> Result<usize> {
        self.axes.encode(index)
    }

    /// Evaluate the cell at `index`.
    ///
    /// Every axis of this tensor must be present in `index` and in range;
    /// the error names the first offending axis.
    pub fn at(&self, index: &TensorIndex) -> Result<T> {
        self.axes.validate(index)?;
        (self.factory)(index)
    }

    /// Evaluate the cell at a linear index.
    pub fn at_linear(&self, linear: usize) -> Result<T> {
        let index = self.coordinate(linear)?;
        (self.factory)(&index)
    }

    /// Sequential pass over all cells, in linear order.
    pub fn iter(&self) -> Cells<'_, T> {
        Cells {
            tensor: self,
            next: 0,
            size: self.size(),
        }
    }

    /// Evaluate every cell in iteration order.
    pub fn materialize(&self) -> Result<Vec<T>> {
        self.iter().map(|cell| cell.value()).collect()
    }

    /// Whether two tensors share the same factory.
    ///
    /// Tensors have no value equality: factories are arbitrary closures.
    pub fn ptr_eq(&self, other: &Tensor<T>) -> bool {
        self.axes == other.axes && Rc::ptr_eq(&self.factory, &other.factory)
    }
}

// ============================================================================
// Composition
// ============================================================================

impl<T: 'static> Tensor<T> {
    /// Combine with another operand elementwise, broadcasting by axis name.
    ///
    /// `other` is lifted with [`Tensorize`]; the result lives on the merged
    /// shape and fails with [`CoreError::AxisMismatch`](crate::CoreError::AxisMismatch) if the shapes
    /// disagree on a shared axis.
    pub fn apply_binary<R, O, F>(&self, other: R, op: F) -> Result<Tensor<O>>
    where
        R: Tensorize,
        R::Item: 'static,
        O: 'static,
        F: Fn(T, R::Item) -> O + 'static,
    {
        let other = other.tensorize();
        let axes = merge_axes([&self.axes, other.axes()])?;
        let lhs = self.clone();
        Tensor::fallible(axes, move |index| Ok(op(lhs.at(index)?, other.at(index)?)))
    }

    /// Elementwise transform; the shape is preserved exactly.
    pub fn map<O, F>(&self, f: F) -> Tensor<O>
    where
        O: 'static,
        F: Fn(&TensorIndex, T) -> O + 'static,
    {
        let inner = self.clone();
        Tensor::from_parts(self.axes.clone(), self.size, move |index| {
            let value = inner.at(index)?;
            Ok(f(index, value))
        })
    }

    /// Full reduction to a 0-axis tensor.
    ///
    /// The single cell folds `f` over every cell in iteration order, starting
    /// from `init`.
    pub fn accumulate<A, F>(&self, init: A, f: F) -> Tensor<A>
    where
        A: Clone + 'static,
        F: Fn(A, T) -> A + 'static,
    {
        let inner = self.clone();
        Tensor::from_parts(TensorAxes::scalar(), 1, move |_| {
            inner
                .iter()
                .try_fold(init.clone(), |acc, cell| Ok(f(acc, cell.value()?)))
        })
    }

    /// Partial reduction over the named axes.
    ///
    /// For each coordinate of the remaining (outer) axes, the cells sharing
    /// that coordinate are folded with `f` as in [`Tensor::accumulate`]. The
    /// result is a tensor over the outer axes only.
    pub fn accumulate_axes<S, A, F>(&self, reduce: &[S], init: A, f: F) -> Result<Tensor<A>>
    where
        S: AsRef<str>,
        A: Clone + 'static,
        F: Fn(A, T) -> A + 'static,
    {
        let (inner_axes, outer_axes) = self.axes.split(reduce)?;
        tracing::debug!(
            reduce = %inner_axes,
            keep = %outer_axes,
            "partial reduction"
        );
        let inner_size = inner_axes.numel()?;
        let inner = self.clone();
        Tensor::fallible(outer_axes, move |outer| {
            let mut acc = init.clone();
            for linear in 0..inner_size {
                let cell = outer.merged_with(&inner_axes.decode(linear)?);
                acc = f(acc, inner.at(&cell)?);
            }
            Ok(acc)
        })
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// One cell yielded by [`Tensor::iter`].
///
/// The value is not computed until [`TensorCell::value`] is called, so a
/// consumer can evaluate cells one by one and handle each outcome on its own.
pub struct TensorCell<'a, T> {
    pub linear_index: usize,
    pub index: TensorIndex,
    tensor: &'a Tensor<T>,
}

impl<T> TensorCell<'_, T> {
    /// Evaluate this cell.
    pub fn value(&self) -> Result<T> {
        (self.tensor.factory)(&self.index)
    }
}

impl<T> fmt::Debug for TensorCell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorCell")
            .field("linear_index", &self.linear_index)
            .field("index", &self.index)
            .finish()
    }
}

/// Iterator over the cells of a tensor.
pub struct Cells<'a, T> {
    tensor: &'a Tensor<T>,
    next: usize,
    size: usize,
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = TensorCell<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.size {
            return None;
        }
        let linear_index = self.next;
        self.next += 1;
        // In range by construction, so decoding cannot fail.
        let index = self.tensor.axes.decode(linear_index).ok()?;
        Some(TensorCell {
            linear_index,
            index,
            tensor: self.tensor,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}

impl<'a, T> IntoIterator for &'a Tensor<T> {
    type Item = TensorCell<'a, T>;
    type IntoIter = Cells<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
