//! # Analysis - Driving Flow Observables
//!
//! The collaborator side of the tensor algebra: where leaves come from,
//! which tensors a flow analysis builds, and how a finished tensor of
//! expressions is evaluated and stored.
//!
//! - [`MemoryStore`]: a [`LeafSource`](flowcorr_lazy::LeafSource) over a hash map
//! - [`correlation_tensor`], [`three_subevent_resolution`], [`flow_coefficient`]:
//!   observable recipes
//! - [`Sweep`]: cell-by-cell evaluation that tolerates missing leaves
//! - [`AnalysisConfig`]: JSON configuration
//! - [`init_tracing`]: subscriber setup for binaries
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use flowcorr_analysis::{correlation_tensor, MemorySink, MemoryStore, Sweep};
//! use flowcorr_core::enumerate;
//! use flowcorr_lazy::{LeafRequest, LeafSource};
//!
//! let mut store = MemoryStore::<f64>::new();
//! store.insert(LeafRequest::new(["pt1", "psd1"], "x1x1"), 0.02);
//! let source: Rc<dyn LeafSource<f64>> = Rc::new(store);
//!
//! let tracks = enumerate("tracks", ["pt1".to_string()]).tensor();
//! let reference = enumerate("ref", ["psd1".to_string(), "psd2".to_string()]).tensor();
//! let component = enumerate("component", ["x1x1".to_string()]).tensor();
//! let corr = correlation_tensor(source, vec![tracks, reference], component).unwrap();
//!
//! let mut sink = MemorySink::<f64>::new();
//! let report = Sweep::default().run(&corr, &mut sink).unwrap();
//! assert_eq!(report.evaluated, 1);
//! assert_eq!(report.missing.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod store;
pub mod sweep;

pub use config::{AnalysisConfig, LogFormat, LoggingConfig, SweepConfig};
pub use error::AnalysisError;
pub use logging::init_tracing;
pub use recipe::{
    component_axis, correlation_tensor, flow_coefficient, three_subevent_resolution, Component,
};
pub use store::MemoryStore;
pub use sweep::{
    Evaluate, JsonLinesSink, MemorySink, MissingCell, ResultSink, Sweep, SweepReport,
};
