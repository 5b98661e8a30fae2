//! # Lazy - Deferred Expressions with Provenance
//!
//! Cells of a derived-observable tensor are not numbers but recipes. This
//! crate provides the recipe type:
//!
//! - [`LazyValue`]: a closed expression tree of constants, external leaf
//!   fetches, unary and binary operations
//! - [`LeafSource`] / [`LeafRequest`]: the boundary to whatever stores the
//!   measured correlations
//! - [`LazyTask`]: an expression frozen into a named unit of work
//! - [`LazyTensorExt`]: cell-wise helpers for tensors of expressions
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use flowcorr_core::{enumerate, sqrt, tensorize_apply2};
//! use flowcorr_lazy::{fetch_tensor, LazyError, LazyValue, LeafRequest, LeafSource};
//!
//! let store: Rc<dyn LeafSource<f64>> = Rc::new(|req: &LeafRequest| -> Result<f64, LazyError> {
//!     Ok(req.names.len() as f64)
//! });
//!
//! let reference = enumerate("ref", ["psd1", "psd2"]);
//! let component = enumerate("component", ["x1", "y1"]);
//! let requests = tensorize_apply2(
//!     |r: &str, c: &str| LeafRequest::new([r], c),
//!     &reference,
//!     &component,
//! )
//! .unwrap();
//!
//! let leaves = fetch_tensor(store, &requests);
//! let scaled = sqrt(LazyValue::constant(4.0) * &leaves).unwrap();
//!
//! let first = scaled.at_linear(0).unwrap();
//! assert_eq!(first.value().unwrap(), 2.0);
//! assert_eq!(first.display_name(), "sqrt((Const(4)*psd1.x1))");
//! ```

mod error;
mod leaf;
mod ops;
mod task;
mod tensor;
mod value;

pub use error::LazyError;
pub use leaf::{Leaf, LeafRequest, LeafSource};
pub use task::LazyTask;
pub use tensor::{fetch_tensor, LazyTensorExt};
pub use value::LazyValue;
