//! # Frozen Expressions
//!
//! A computed tensor cell is usually a large expression. [`LazyTask`]
//! freezes it into a named unit of work: evaluating the task re-runs the
//! captured tree, and the task's name defaults to the tree's provenance
//! string but can be overridden (e.g. with the name the result will be
//! stored under).
//!
//! A task is not an operand itself. To keep computing with it, turn it back
//! into an expression with [`LazyTask::into_value`] (or `LazyValue::from`):
//! the result is a pass-through node labelled with the task's name, so the
//! name survives in every larger provenance string.
//!
//! ```rust
//! use flowcorr_lazy::LazyValue;
//!
//! let v1 = (LazyValue::constant(1.0) + LazyValue::constant(1.0)).as_function_named("v1");
//! let doubled = v1.into_value() * LazyValue::constant(2.0);
//! assert_eq!(doubled.display_name(), "(v1((Const(1)+Const(1)))*Const(2))");
//! assert_eq!(doubled.value().unwrap(), 4.0);
//! ```

use std::fmt;

use crate::error::LazyError;
use crate::value::LazyValue;

/// A captured expression with a display name.
pub struct LazyTask<T> {
    expr: LazyValue<T>,
    name: String,
}

impl<T> LazyTask<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &LazyValue<T> {
        &self.expr
    }
}

impl<T: Clone> LazyTask<T> {
    /// Re-run the captured expression.
    pub fn value(&self) -> Result<T, LazyError> {
        self.expr.value()
    }
}

impl<T: 'static> LazyTask<T> {
    /// Wrap the task's expression in an identity node labelled with its name.
    pub fn into_value(self) -> LazyValue<T> {
        LazyValue::unary(self.expr, &self.name, |x: T| x)
    }
}

impl<T: 'static> From<LazyTask<T>> for LazyValue<T> {
    fn from(task: LazyTask<T>) -> Self {
        task.into_value()
    }
}

impl<T: fmt::Display> LazyValue<T> {
    /// Freeze this expression, named after its provenance string.
    pub fn as_function(&self) -> LazyTask<T>
    where
        T: Clone,
    {
        LazyTask {
            expr: self.clone(),
            name: self.display_name(),
        }
    }
}

impl<T: Clone> LazyValue<T> {
    /// Freeze this expression under an explicit name.
    pub fn as_function_named(&self, name: impl Into<String>) -> LazyTask<T> {
        LazyTask {
            expr: self.clone(),
            name: name.into(),
        }
    }
}

impl<T: Clone> Clone for LazyTask<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T> fmt::Display for LazyTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTask")
            .field("name", &self.name)
            .field("expr", &self.expr)
            .finish()
    }
}
