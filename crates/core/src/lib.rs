//! # Core - Named-Axis Tensors
//!
//! This crate provides the tensor algebra the flow analysis is built on:
//!
//! - **Axes**: named, ordered value domains ([`Enumeration`])
//! - **Shapes**: axis name → size, merged by name ([`TensorAxes`])
//! - **Coordinates**: axis name → position ([`TensorIndex`])
//! - **Tensors**: a shape plus a factory, composed without evaluating ([`Tensor`])
//! - **Adapters**: lifting scalars and axes into tensors ([`tensorize`])
//! - **Errors**: structural composition failures ([`CoreError`])
//!
//! ## Design Philosophy
//!
//! Axis sets come from analysis configuration, not from compile-time
//! knowledge, so shapes are runtime maps keyed by axis name. Tensors combine
//! by *name*: broadcasting is the union of the operands' axes, and an axis
//! named by both must have the same size. A tensor never stores its cells;
//! it is a recipe that the consumer evaluates cell by cell.

pub mod axis;
pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;
pub mod tensorize;

// Re-export key types at crate root for convenience
pub use axis::{enumerate, Enumeration};
pub use error::CoreError;
pub use ops::{sqrt, Sqrt};
pub use shape::{merge_axes, TensorAxes, TensorIndex};
pub use tensor::{Cells, Tensor, TensorCell};
pub use tensorize::{tensorize, tensorize_apply, tensorize_apply2, tensorize_apply3, Scalar, Tensorize};
