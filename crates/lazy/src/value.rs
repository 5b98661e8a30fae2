//! # Lazy Values
//!
//! A [`LazyValue`] is an unevaluated scalar computation: a small expression
//! tree whose leaves are constants or external fetches and whose inner nodes
//! apply unary or binary functions. Every node also knows how to print
//! itself, so a finished result can say exactly what it was computed from.
//!
//! ```text
//!                 sqrt
//!                   │
//!                   *            sqrt((Const(2)*psd1.x1))
//!                 ┌─┴─┐
//!          Const(2)   psd1.x1
//! ```
//!
//! ## Evaluation
//!
//! [`LazyValue::value`] re-evaluates every descendant on each call; there is
//! no memoization. A node is immutable after construction, so subtrees are
//! shared by reference count and cloning an expression copies only its
//! structure, never a computed value.
//!
//! ## Example
//!
//! ```rust
//! use flowcorr_core::sqrt;
//! use flowcorr_lazy::LazyValue;
//!
//! let a = LazyValue::constant(8.0);
//! let expr = sqrt(LazyValue::constant(2.0) * a);
//!
//! assert_eq!(expr.value().unwrap(), 4.0);
//! assert_eq!(expr.display_name(), "sqrt((Const(2)*Const(8)))");
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::LazyError;
use crate::leaf::{Leaf, LeafRequest, LeafSource};

pub(crate) type UnaryFn<T> = Rc<dyn Fn(T) -> T>;
pub(crate) type BinaryFn<T> = Rc<dyn Fn(T, T) -> T>;

/// A deferred computation over values of type `T`.
///
/// The node set is closed: every consumer matches all four variants.
pub enum LazyValue<T> {
    /// A known value.
    Const(T),

    /// A value looked up through an external source; may fail.
    Fetch(Leaf<T>),

    /// `op(child)`, printed as `label(child)`.
    Unary {
        child: Rc<LazyValue<T>>,
        op: UnaryFn<T>,
        label: Rc<str>,
    },

    /// `op(left, right)`, printed as `(left symbol right)`.
    Binary {
        left: Rc<LazyValue<T>>,
        right: Rc<LazyValue<T>>,
        op: BinaryFn<T>,
        symbol: Rc<str>,
    },
}

impl<T> LazyValue<T> {
    pub fn constant(value: T) -> Self {
        LazyValue::Const(value)
    }

    /// A leaf resolved by `source` at evaluation time.
    pub fn fetch(source: Rc<dyn LeafSource<T>>, request: LeafRequest) -> Self {
        LazyValue::Fetch(Leaf::new(source, request))
    }

    /// Apply a custom unary function.
    pub fn unary<F>(child: LazyValue<T>, label: &str, op: F) -> Self
    where
        F: Fn(T) -> T + 'static,
    {
        LazyValue::Unary {
            child: Rc::new(child),
            op: Rc::new(op),
            label: Rc::from(label),
        }
    }

    /// Apply a custom binary function.
    pub fn binary<F>(left: LazyValue<T>, right: LazyValue<T>, symbol: &str, op: F) -> Self
    where
        F: Fn(T, T) -> T + 'static,
    {
        LazyValue::Binary {
            left: Rc::new(left),
            right: Rc::new(right),
            op: Rc::new(op),
            symbol: Rc::from(symbol),
        }
    }

    /// Height of the expression tree; leaves have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            LazyValue::Const(_) | LazyValue::Fetch(_) => 1,
            LazyValue::Unary { child, .. } => 1 + child.depth(),
            LazyValue::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Every external request this expression will make, left to right.
    pub fn leaf_requests(&self) -> Vec<&LeafRequest> {
        let mut out = Vec::new();
        self.collect_requests(&mut out);
        out
    }

    fn collect_requests<'a>(&'a self, out: &mut Vec<&'a LeafRequest>) {
        match self {
            LazyValue::Const(_) => {}
            LazyValue::Fetch(leaf) => out.push(leaf.request()),
            LazyValue::Unary { child, .. } => child.collect_requests(out),
            LazyValue::Binary { left, right, .. } => {
                left.collect_requests(out);
                right.collect_requests(out);
            }
        }
    }
}

impl<T: Clone> LazyValue<T> {
    /// Evaluate the whole tree.
    ///
    /// Fails only if a leaf fetch fails; the error is the first failing leaf
    /// in left-to-right order.
    pub fn value(&self) -> Result<T, LazyError> {
        match self {
            LazyValue::Const(v) => Ok(v.clone()),
            LazyValue::Fetch(leaf) => leaf.fetch(),
            LazyValue::Unary { child, op, .. } => Ok(op(child.value()?)),
            LazyValue::Binary {
                left, right, op, ..
            } => {
                let l = left.value()?;
                let r = right.value()?;
                Ok(op(l, r))
            }
        }
    }
}

impl<T: fmt::Display> LazyValue<T> {
    /// Human-readable provenance of this expression.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for LazyValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LazyValue::Const(v) => write!(f, "Const({})", v),
            LazyValue::Fetch(leaf) => write!(f, "{}", leaf.request()),
            LazyValue::Unary { child, label, .. } => write!(f, "{}({})", label, child),
            LazyValue::Binary {
                left,
                right,
                symbol,
                ..
            } => write!(f, "({}{}{})", left, symbol, right),
        }
    }
}

impl<T: Clone> Clone for LazyValue<T> {
    fn clone(&self) -> Self {
        match self {
            LazyValue::Const(v) => LazyValue::Const(v.clone()),
            LazyValue::Fetch(leaf) => LazyValue::Fetch(leaf.clone()),
            LazyValue::Unary { child, op, label } => LazyValue::Unary {
                child: Rc::clone(child),
                op: Rc::clone(op),
                label: Rc::clone(label),
            },
            LazyValue::Binary {
                left,
                right,
                op,
                symbol,
            } => LazyValue::Binary {
                left: Rc::clone(left),
                right: Rc::clone(right),
                op: Rc::clone(op),
                symbol: Rc::clone(symbol),
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LazyValue::Const(v) => f.debug_tuple("Const").field(v).finish(),
            LazyValue::Fetch(leaf) => f.debug_tuple("Fetch").field(leaf).finish(),
            LazyValue::Unary { child, label, .. } => f
                .debug_struct("Unary")
                .field("label", label)
                .field("child", child)
                .finish_non_exhaustive(),
            LazyValue::Binary {
                left,
                right,
                symbol,
                ..
            } => f
                .debug_struct("Binary")
                .field("symbol", symbol)
                .field("left", left)
                .field("right", right)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> From<Leaf<T>> for LazyValue<T> {
    fn from(leaf: Leaf<T>) -> Self {
        LazyValue::Fetch(leaf)
    }
}
