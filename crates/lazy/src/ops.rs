//! # Expression Arithmetic
//!
//! `+ - * /`, unary `-` and `sqrt` build new expression nodes. They are
//! defined only between [`LazyValue`]s: a plain `f64` cannot be multiplied
//! into an expression, it has to be wrapped with [`LazyValue::constant`]
//! first so that it shows up in the provenance string.
//!
//! ```compile_fail
//! use flowcorr_lazy::LazyValue;
//!
//! let a = LazyValue::constant(1.0);
//! let _ = a * 2.0; // no `Mul<f64>` for expressions
//! ```
//!
//! Expressions also take part in tensor broadcasting: a single expression
//! lifts to a 0-axis tensor, and an expression on the left of a tensor of
//! expressions is broadcast over it.

use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

use flowcorr_core::{CoreError, Sqrt, Tensor, Tensorize};

use crate::value::LazyValue;

macro_rules! lazy_binary_op {
    ($trait:ident, $method:ident, $symbol:literal) => {
        impl<T> $trait for LazyValue<T>
        where
            T: $trait<Output = T> + 'static,
        {
            type Output = LazyValue<T>;

            fn $method(self, rhs: LazyValue<T>) -> LazyValue<T> {
                LazyValue::Binary {
                    left: Rc::new(self),
                    right: Rc::new(rhs),
                    op: Rc::new(|a: T, b: T| a.$method(b)),
                    symbol: Rc::from($symbol),
                }
            }
        }

        impl<T> $trait<&LazyValue<T>> for &LazyValue<T>
        where
            T: $trait<Output = T> + Clone + 'static,
        {
            type Output = LazyValue<T>;

            fn $method(self, rhs: &LazyValue<T>) -> LazyValue<T> {
                self.clone().$method(rhs.clone())
            }
        }

        impl<T> $trait<Tensor<LazyValue<T>>> for LazyValue<T>
        where
            T: $trait<Output = T> + Clone + 'static,
        {
            type Output = Result<Tensor<LazyValue<T>>, CoreError>;

            fn $method(self, rhs: Tensor<LazyValue<T>>) -> Self::Output {
                Tensor::scalar(self).apply_binary(rhs, |a, b| a.$method(b))
            }
        }

        impl<T> $trait<&Tensor<LazyValue<T>>> for LazyValue<T>
        where
            T: $trait<Output = T> + Clone + 'static,
        {
            type Output = Result<Tensor<LazyValue<T>>, CoreError>;

            fn $method(self, rhs: &Tensor<LazyValue<T>>) -> Self::Output {
                Tensor::scalar(self).apply_binary(rhs, |a, b| a.$method(b))
            }
        }
    };
}

lazy_binary_op!(Add, add, "+");
lazy_binary_op!(Sub, sub, "-");
lazy_binary_op!(Mul, mul, "*");
lazy_binary_op!(Div, div, "/");

impl<T> Neg for LazyValue<T>
where
    T: Neg<Output = T> + 'static,
{
    type Output = LazyValue<T>;

    fn neg(self) -> LazyValue<T> {
        LazyValue::unary(self, "-", |x: T| -x)
    }
}

impl<T> Sqrt for LazyValue<T>
where
    T: Sqrt<Output = T> + 'static,
{
    type Output = LazyValue<T>;

    fn sqrt(self) -> LazyValue<T> {
        LazyValue::unary(self, "sqrt", |x: T| x.sqrt())
    }
}

impl<T> Sqrt for &LazyValue<T>
where
    T: Sqrt<Output = T> + Clone + 'static,
{
    type Output = LazyValue<T>;

    fn sqrt(self) -> LazyValue<T> {
        self.clone().sqrt()
    }
}

impl<T: Clone + 'static> Tensorize for LazyValue<T> {
    type Item = LazyValue<T>;

    fn tensorize(self) -> Tensor<LazyValue<T>> {
        Tensor::scalar(self)
    }
}
