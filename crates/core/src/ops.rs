//! # Arithmetic Operators
//!
//! `+ - * /` between tensors, enumerations and scalars, in either operand
//! order. Every operator goes through [`Tensor::apply_binary`], so the
//! output is a `Result`: broadcasting fails if the operands disagree on the
//! size of a shared axis.
//!
//! ```rust
//! use flowcorr_core::{enumerate, sqrt, TensorAxes};
//!
//! let t = enumerate("a", [1.0, 4.0, 9.0]).tensor();
//! let scaled = (2.0 * &t).unwrap();
//! assert_eq!(scaled.axes(), &TensorAxes::from([("a", 3)]));
//!
//! let roots = sqrt(scaled / 2.0).unwrap();
//! assert_eq!(roots.materialize().unwrap(), vec![1.0, 2.0, 3.0]);
//! ```
//!
//! ## Scalars on the left
//!
//! A bare primitive operand is only supported for `f64` and the integer
//! types, on either side. `f64` is the only float, so an unsuffixed float literal resolves
//! to it. Integer literals need a suffix (`3_i64 * &t`) because several
//! integer types qualify. Any other left operand, including `f32`, goes
//! through [`Scalar`]:
//!
//! ```rust
//! use flowcorr_core::{enumerate, Scalar};
//!
//! let t = enumerate("a", [1.0_f32, 2.0]).tensor();
//! let halved = (Scalar(0.5_f32) * &t).unwrap();
//! assert_eq!(halved.materialize().unwrap(), vec![0.5, 1.0]);
//!
//! let n = enumerate("n", [1_i64, 2]).tensor();
//! assert_eq!((3_i64 * &n).unwrap().materialize().unwrap(), vec![3, 6]);
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::axis::Enumeration;
use crate::error::Result;
use crate::tensor::Tensor;
use crate::tensorize::{Scalar, Tensorize};

/// Square root, for the element types that support it.
///
/// Implemented for the float primitives and for tensors of such elements;
/// expression crates implement it for their node types.
pub trait Sqrt {
    type Output;

    fn sqrt(self) -> Self::Output;
}

/// Free-function form of [`Sqrt::sqrt`].
pub fn sqrt<X: Sqrt>(x: X) -> X::Output {
    x.sqrt()
}

impl Sqrt for f64 {
    type Output = f64;

    fn sqrt(self) -> f64 {
        f64::sqrt(self)
    }
}

impl Sqrt for f32 {
    type Output = f32;

    fn sqrt(self) -> f32 {
        f32::sqrt(self)
    }
}

impl<T> Sqrt for Tensor<T>
where
    T: Sqrt + 'static,
    T::Output: 'static,
{
    type Output = Tensor<T::Output>;

    fn sqrt(self) -> Tensor<T::Output> {
        self.map(|_, v| v.sqrt())
    }
}

impl<T> Sqrt for &Tensor<T>
where
    T: Sqrt + 'static,
    T::Output: 'static,
{
    type Output = Tensor<T::Output>;

    fn sqrt(self) -> Tensor<T::Output> {
        self.map(|_, v| v.sqrt())
    }
}

/// Lets `sqrt` be chained after a fallible tensor operator.
impl<T> Sqrt for Result<Tensor<T>>
where
    T: Sqrt + 'static,
    T::Output: 'static,
{
    type Output = Result<Tensor<T::Output>>;

    fn sqrt(self) -> Result<Tensor<T::Output>> {
        self.map(Sqrt::sqrt)
    }
}

// ============================================================================
// Tensor on the left
// ============================================================================

macro_rules! tensor_binary_op {
    ($trait:ident, $method:ident) => {
        impl<T, R> $trait<R> for Tensor<T>
        where
            R: Tensorize,
            R::Item: 'static,
            T: $trait<R::Item> + 'static,
            T::Output: 'static,
        {
            type Output = Result<Tensor<T::Output>>;

            fn $method(self, rhs: R) -> Self::Output {
                self.apply_binary(rhs, |a, b| a.$method(b))
            }
        }

        impl<T, R> $trait<R> for &Tensor<T>
        where
            R: Tensorize,
            R::Item: 'static,
            T: $trait<R::Item> + 'static,
            T::Output: 'static,
        {
            type Output = Result<Tensor<T::Output>>;

            fn $method(self, rhs: R) -> Self::Output {
                self.apply_binary(rhs, |a, b| a.$method(b))
            }
        }

        impl<T, R> $trait<R> for &Enumeration<T>
        where
            R: Tensorize,
            R::Item: 'static,
            T: $trait<R::Item> + Clone + 'static,
            T::Output: 'static,
        {
            type Output = Result<Tensor<T::Output>>;

            fn $method(self, rhs: R) -> Self::Output {
                self.tensor().apply_binary(rhs, |a, b| a.$method(b))
            }
        }

        impl<T, R> $trait<R> for Enumeration<T>
        where
            R: Tensorize,
            R::Item: 'static,
            T: $trait<R::Item> + Clone + 'static,
            T::Output: 'static,
        {
            type Output = Result<Tensor<T::Output>>;

            fn $method(self, rhs: R) -> Self::Output {
                self.tensor().apply_binary(rhs, |a, b| a.$method(b))
            }
        }

        impl<T, R> $trait<R> for Scalar<T>
        where
            R: Tensorize,
            R::Item: 'static,
            T: $trait<R::Item> + Clone + 'static,
            T::Output: 'static,
        {
            type Output = Result<Tensor<T::Output>>;

            fn $method(self, rhs: R) -> Self::Output {
                Tensor::scalar(self.0).apply_binary(rhs, |a, b| a.$method(b))
            }
        }
    };
}

tensor_binary_op!(Add, add);
tensor_binary_op!(Sub, sub);
tensor_binary_op!(Mul, mul);
tensor_binary_op!(Div, div);

// ============================================================================
// Scalar on the left
// ============================================================================

macro_rules! scalar_binary_op {
    ($scalar:ty => $(($trait:ident, $method:ident)),*) => {
        $(
            impl<T> $trait<Tensor<T>> for $scalar
            where
                $scalar: $trait<T>,
                T: 'static,
                <$scalar as $trait<T>>::Output: 'static,
            {
                type Output = Result<Tensor<<$scalar as $trait<T>>::Output>>;

                fn $method(self, rhs: Tensor<T>) -> Self::Output {
                    Tensor::scalar(self).apply_binary(rhs, |a, b| a.$method(b))
                }
            }

            impl<T> $trait<&Tensor<T>> for $scalar
            where
                $scalar: $trait<T>,
                T: 'static,
                <$scalar as $trait<T>>::Output: 'static,
            {
                type Output = Result<Tensor<<$scalar as $trait<T>>::Output>>;

                fn $method(self, rhs: &Tensor<T>) -> Self::Output {
                    Tensor::scalar(self).apply_binary(rhs, |a, b| a.$method(b))
                }
            }
        )*
    };
}

macro_rules! scalar_binary_ops {
    ($($scalar:ty),*) => {
        $(
            scalar_binary_op!($scalar => (Add, add), (Sub, sub), (Mul, mul), (Div, div));
        )*
    };
}

scalar_binary_ops!(f64, i32, i64, u32, u64, usize);

// ============================================================================
// Unary
// ============================================================================

impl<T> Neg for Tensor<T>
where
    T: Neg + 'static,
    T::Output: 'static,
{
    type Output = Tensor<T::Output>;

    fn neg(self) -> Self::Output {
        self.map(|_, v| -v)
    }
}

impl<T> Neg for &Tensor<T>
where
    T: Neg + 'static,
    T::Output: 'static,
{
    type Output = Tensor<T::Output>;

    fn neg(self) -> Self::Output {
        self.map(|_, v| -v)
    }
}
