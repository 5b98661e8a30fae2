//! # Tensors of Expressions
//!
//! Helpers for the common case where every cell of a tensor is a
//! [`LazyValue`]: building a tensor of leaf fetches from a tensor of
//! requests, and freezing or inspecting cells without evaluating them.

use std::fmt;
use std::rc::Rc;

use flowcorr_core::{Tensor, TensorIndex};

use crate::error::LazyError;
use crate::leaf::{LeafRequest, LeafSource};
use crate::task::LazyTask;
use crate::value::LazyValue;

/// Turn every request cell into a leaf fetch against `source`.
pub fn fetch_tensor<T: 'static>(
    source: Rc<dyn LeafSource<T>>,
    requests: &Tensor<LeafRequest>,
) -> Tensor<LazyValue<T>> {
    requests.map(move |_, request| LazyValue::fetch(Rc::clone(&source), request))
}

/// Cell-wise operations on a tensor of expressions.
pub trait LazyTensorExt<T> {
    /// Freeze every cell, named after its provenance string.
    fn as_functions(&self) -> Tensor<LazyTask<T>>;

    /// Freeze every cell under a name computed from its coordinate.
    fn as_functions_named<F>(&self, name: F) -> Tensor<LazyTask<T>>
    where
        F: Fn(&TensorIndex, &LazyValue<T>) -> String + 'static;

    /// Provenance string of every cell.
    fn display_names(&self) -> Tensor<String>;

    /// Tensor whose cells are the evaluation outcomes.
    fn evaluated(&self) -> Tensor<Result<T, LazyError>>;
}

impl<T> LazyTensorExt<T> for Tensor<LazyValue<T>>
where
    T: Clone + fmt::Display + 'static,
{
    fn as_functions(&self) -> Tensor<LazyTask<T>> {
        self.map(|_, expr| expr.as_function())
    }

    fn as_functions_named<F>(&self, name: F) -> Tensor<LazyTask<T>>
    where
        F: Fn(&TensorIndex, &LazyValue<T>) -> String + 'static,
    {
        self.map(move |index, expr| {
            let label = name(index, &expr);
            expr.as_function_named(label)
        })
    }

    fn display_names(&self) -> Tensor<String> {
        self.map(|_, expr| expr.display_name())
    }

    fn evaluated(&self) -> Tensor<Result<T, LazyError>> {
        self.map(|_, expr| expr.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcorr_core::{enumerate, tensorize_apply2, TensorAxes};

    fn requests() -> Tensor<LeafRequest> {
        let reference = enumerate("ref", ["psd1", "psd2"]);
        let component = enumerate("component", ["x1", "y1"]);
        tensorize_apply2(
            |r: &str, c: &str| LeafRequest::new([r], c),
            &reference,
            &component,
        )
        .unwrap()
    }

    fn source() -> Rc<dyn LeafSource<f64>> {
        Rc::new(|req: &LeafRequest| -> Result<f64, LazyError> {
            match (req.names[0].as_str(), req.component.as_str()) {
                ("psd1", "x1") => Ok(1.0),
                ("psd1", "y1") => Ok(2.0),
                ("psd2", "x1") => Ok(3.0),
                _ => Err(LazyError::not_found(req)),
            }
        })
    }

    #[test]
    fn test_fetch_tensor_shape_and_names() {
        let leaves = fetch_tensor(source(), &requests());
        assert_eq!(
            leaves.axes(),
            &TensorAxes::from([("component", 2), ("ref", 2)])
        );
        let names = leaves.display_names().materialize().unwrap();
        assert_eq!(names, vec!["psd1.x1", "psd2.x1", "psd1.y1", "psd2.y1"]);
    }

    #[test]
    fn test_evaluated_isolates_failures() {
        let leaves = fetch_tensor(source(), &requests());
        let outcomes = leaves.evaluated().materialize().unwrap();
        assert_eq!(outcomes[0], Ok(1.0));
        assert_eq!(outcomes[1], Ok(3.0));
        assert_eq!(outcomes[2], Ok(2.0));
        assert!(outcomes[3].is_err());
    }

    #[test]
    fn test_as_functions_named() {
        let leaves = fetch_tensor(source(), &requests());
        let tasks = leaves.as_functions_named(|index, _| format!("cell{}", index));
        let task = tasks.at_linear(0).unwrap();
        assert_eq!(task.name(), "cell{component=0, ref=0}");
        assert_eq!(task.value().unwrap(), 1.0);
    }

    #[test]
    fn test_as_functions_keeps_provenance() {
        let leaves = fetch_tensor(source(), &requests());
        let tasks = leaves.as_functions();
        assert_eq!(tasks.at_linear(1).unwrap().name(), "psd2.x1");
    }
}
