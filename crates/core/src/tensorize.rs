//! # Lifting Operands into Tensors
//!
//! Broadcasting works on tensors only, so every operand is first lifted:
//!
//! | Operand | Lifted to |
//! |---------|-----------|
//! | `Tensor<T>` | itself |
//! | `Enumeration<T>` | `enumeration.tensor()` (one axis) |
//! | scalar / `Scalar<T>` | a 0-axis tensor that ignores its coordinate |
//!
//! [`tensorize_apply`] is the generic N-ary entry point: lift every argument,
//! merge all shapes, and evaluate a function of the per-cell values. The
//! fixed-arity [`tensorize_apply2`] and [`tensorize_apply3`] accept operands
//! of different element types, e.g. a reference-name axis and a component
//! axis feeding one leaf constructor.
//!
//! ```rust
//! use flowcorr_core::{enumerate, tensorize_apply2, TensorAxes};
//!
//! let reference = enumerate("ref", ["psd1", "psd2", "psd3"]);
//! let component = enumerate("component", ["x1", "y1"]);
//!
//! let names = tensorize_apply2(
//!     |r: &str, c: &str| format!("{r}.{c}"),
//!     &reference,
//!     &component,
//! )
//! .unwrap();
//! assert_eq!(names.size(), 6);
//! assert_eq!(names.axes(), &TensorAxes::from([("component", 2), ("ref", 3)]));
//! ```

use crate::axis::Enumeration;
use crate::error::Result;
use crate::shape::merge_axes;
use crate::tensor::Tensor;

/// Anything that can take part in broadcasting.
pub trait Tensorize {
    /// Element type of the lifted tensor.
    type Item;

    fn tensorize(self) -> Tensor<Self::Item>;
}

/// Lift an operand into a tensor.
pub fn tensorize<X: Tensorize>(x: X) -> Tensor<X::Item> {
    x.tensorize()
}

/// Wrapper that lifts any value to a 0-axis tensor.
///
/// `f64`, the integer primitives, strings and booleans are lifted directly.
/// Other value types, `f32` included, go through this wrapper so that an
/// unsuffixed float literal always means `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scalar<T>(pub T);

impl<T> Tensorize for Tensor<T> {
    type Item = T;

    fn tensorize(self) -> Tensor<T> {
        self
    }
}

impl<T> Tensorize for &Tensor<T> {
    type Item = T;

    fn tensorize(self) -> Tensor<T> {
        self.clone()
    }
}

impl<T: Clone + 'static> Tensorize for Enumeration<T> {
    type Item = T;

    fn tensorize(self) -> Tensor<T> {
        self.tensor()
    }
}

impl<T: Clone + 'static> Tensorize for &Enumeration<T> {
    type Item = T;

    fn tensorize(self) -> Tensor<T> {
        self.tensor()
    }
}

impl<T: Clone + 'static> Tensorize for Scalar<T> {
    type Item = T;

    fn tensorize(self) -> Tensor<T> {
        Tensor::scalar(self.0)
    }
}

macro_rules! tensorize_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tensorize for $ty {
                type Item = $ty;

                fn tensorize(self) -> Tensor<$ty> {
                    Tensor::scalar(self)
                }
            }
        )*
    };
}

tensorize_scalar!(f64, i32, i64, u32, u64, usize, bool, String, &'static str);

/// Broadcast an N-ary function over operands of one element type.
///
/// The result lives on the merged shape of all arguments. The function sees
/// the per-cell values in argument order.
pub fn tensorize_apply<X, O, F>(f: F, args: Vec<X>) -> Result<Tensor<O>>
where
    X: Tensorize,
    X::Item: 'static,
    O: 'static,
    F: Fn(Vec<X::Item>) -> O + 'static,
{
    let tensors: Vec<Tensor<X::Item>> = args.into_iter().map(Tensorize::tensorize).collect();
    let axes = merge_axes(tensors.iter().map(Tensor::axes))?;
    Tensor::fallible(axes, move |index| {
        let values = tensors
            .iter()
            .map(|t| t.at(index))
            .collect::<Result<Vec<_>>>()?;
        Ok(f(values))
    })
}

/// Broadcast a binary function over two operands of any element types.
pub fn tensorize_apply2<A, B, O, F>(f: F, a: A, b: B) -> Result<Tensor<O>>
where
    A: Tensorize,
    B: Tensorize,
    A::Item: 'static,
    B::Item: 'static,
    O: 'static,
    F: Fn(A::Item, B::Item) -> O + 'static,
{
    a.tensorize().apply_binary(b, f)
}

/// Broadcast a ternary function over three operands of any element types.
pub fn tensorize_apply3<A, B, C, O, F>(f: F, a: A, b: B, c: C) -> Result<Tensor<O>>
where
    A: Tensorize,
    B: Tensorize,
    C: Tensorize,
    A::Item: 'static,
    B::Item: 'static,
    C::Item: 'static,
    O: 'static,
    F: Fn(A::Item, B::Item, C::Item) -> O + 'static,
{
    let (a, b, c) = (a.tensorize(), b.tensorize(), c.tensorize());
    let axes = merge_axes([a.axes(), b.axes(), c.axes()])?;
    Tensor::fallible(axes, move |index| Ok(f(a.at(index)?, b.at(index)?, c.at(index)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate;
    use crate::error::CoreError;
    use crate::shape::{TensorAxes, TensorIndex};

    #[test]
    fn test_tensorize_scalar() {
        let t = tensorize(2.5);
        assert_eq!(t.rank(), 0);
        assert_eq!(t.at(&TensorIndex::from([("anything", 42)])).unwrap(), 2.5);
    }

    #[test]
    fn test_tensorize_wrapped_scalar() {
        #[derive(Clone, Debug, PartialEq)]
        struct Point(i32, i32);

        let t = tensorize(Scalar(Point(1, 2)));
        assert_eq!(t.at_linear(0).unwrap(), Point(1, 2));
    }

    #[test]
    fn test_tensorize_enumeration() {
        let e = enumerate("ref", ["a", "b"]);
        let t = tensorize(&e);
        assert_eq!(t.axes(), &e.axes());
    }

    #[test]
    fn test_tensorize_tensor_is_identity() {
        let t = enumerate("ref", [1, 2]).tensor();
        let lifted = tensorize(&t);
        assert!(lifted.ptr_eq(&t));
    }

    #[test]
    fn test_tensorize_apply_many() {
        let args = vec![
            enumerate("r1", ["a", "b"]).tensor(),
            enumerate("r2", ["a", "b"]).tensor(),
            enumerate("r3", ["a", "b"]).tensor(),
        ];
        let joined = tensorize_apply(|parts: Vec<&str>| parts.concat(), args).unwrap();
        assert_eq!(joined.size(), 8);
        assert_eq!(joined.at_linear(0).unwrap(), "aaa");
        assert_eq!(joined.at_linear(7).unwrap(), "bbb");
    }

    #[test]
    fn test_tensorize_apply_mismatch() {
        let args = vec![
            enumerate("r", [1, 2]).tensor(),
            enumerate("r", [1, 2, 3]).tensor(),
        ];
        let err = tensorize_apply(|v: Vec<i32>| v.len(), args).unwrap_err();
        assert!(matches!(err, CoreError::AxisMismatch { .. }));
    }

    #[test]
    fn test_tensorize_apply_empty_is_scalar() {
        let t = tensorize_apply(|v: Vec<i32>| v.len(), Vec::<Tensor<i32>>::new()).unwrap();
        assert_eq!(t.rank(), 0);
        assert_eq!(t.at_linear(0).unwrap(), 0);
    }

    #[test]
    fn test_tensorize_apply3_mixed_types() {
        let reference = enumerate("ref", ["psd1", "psd2"]);
        let harmonic = enumerate("n", [1u32, 2]);
        let t = tensorize_apply3(
            |r: &str, n: u32, scale: f64| format!("{r}:{n}:{scale}"),
            &reference,
            &harmonic,
            0.5,
        )
        .unwrap();
        assert_eq!(t.axes(), &TensorAxes::from([("n", 2), ("ref", 2)]));
        let idx = TensorIndex::from([("n", 1), ("ref", 0)]);
        assert_eq!(t.at(&idx).unwrap(), "psd1:2:0.5");
    }
}
