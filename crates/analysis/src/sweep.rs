//! # Fault-Tolerant Sweeps
//!
//! A sweep walks every cell of a tensor of expressions, evaluates it, and
//! hands the value to a [`ResultSink`] under a name built from the
//! configured prefix and a per-cell label.
//!
//! ```text
//! Tensor<LazyValue> ──► for each cell ──► evaluate ──┬─► Ok    ──► sink.store(name, value)
//!                                                    └─► Err   ──► warn, record, continue
//! ```
//!
//! A failed leaf fetch only loses its own cell. Structural errors (axes that
//! do not compose, broken coordinates) and sink failures abort the sweep, as
//! does a missing leaf when [`SweepConfig::fail_fast`] is set.
//!
//! Every cell must get its own result name. Labels that do not span all of
//! the cell axes would repeat a name, so the names are checked before the
//! first cell is evaluated and a repeat fails the sweep with
//! [`AnalysisError::DuplicateResult`].

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Write;

use serde::Serialize;

use flowcorr_core::Tensor;
use flowcorr_lazy::{LazyError, LazyTask, LazyValue};

use crate::config::SweepConfig;
use crate::error::AnalysisError;

// ============================================================================
// Evaluation
// ============================================================================

/// Something a sweep can evaluate.
pub trait Evaluate {
    type Output;

    fn evaluate(&self) -> Result<Self::Output, LazyError>;
}

impl<T: Clone> Evaluate for LazyValue<T> {
    type Output = T;

    fn evaluate(&self) -> Result<T, LazyError> {
        self.value()
    }
}

impl<T: Clone> Evaluate for LazyTask<T> {
    type Output = T;

    fn evaluate(&self) -> Result<T, LazyError> {
        self.value()
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Receives evaluated results.
pub trait ResultSink<T> {
    fn store(&mut self, name: &str, value: T) -> Result<(), AnalysisError>;
}

/// Keeps results in memory, ordered by name.
#[derive(Debug, Clone)]
pub struct MemorySink<T> {
    results: BTreeMap<String, T>,
}

impl<T> MemorySink<T> {
    pub fn new() -> Self {
        Self {
            results: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.results.get(name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, T> {
        self.results
    }
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultSink<T> for MemorySink<T> {
    /// Refuses to replace a stored result.
    fn store(&mut self, name: &str, value: T) -> Result<(), AnalysisError> {
        match self.results.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AnalysisError::DuplicateResult {
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
struct Record<'a, T> {
    name: &'a str,
    value: T,
}

/// Writes one JSON object per result: `{"name": ..., "value": ...}`.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T: Serialize, W: Write> ResultSink<T> for JsonLinesSink<W> {
    fn store(&mut self, name: &str, value: T) -> Result<(), AnalysisError> {
        serde_json::to_writer(&mut self.writer, &Record { name, value })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

// ============================================================================
// Sweep
// ============================================================================

/// A cell whose evaluation failed on a missing leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCell {
    pub linear_index: usize,
    pub name: String,
    pub error: LazyError,
}

/// Outcome of a completed sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Cells evaluated and stored.
    pub evaluated: usize,
    /// Cells skipped, in iteration order.
    pub missing: Vec<MissingCell>,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.evaluated + self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} cells evaluated, {} missing",
            self.evaluated,
            self.total(),
            self.missing.len()
        )
    }
}

/// Evaluates tensors cell by cell.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    config: SweepConfig,
}

impl Sweep {
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sweep with each cell labelled by its coordinate, e.g. `{ref=0}`.
    pub fn run<C, S>(&self, cells: &Tensor<C>, sink: &mut S) -> Result<SweepReport, AnalysisError>
    where
        C: Evaluate + 'static,
        S: ResultSink<C::Output>,
    {
        let labels = Tensor::new(cells.axes().clone(), |index| index.to_string())?;
        self.run_labelled(cells, &labels, sink)
    }

    /// Sweep with labels taken from a tensor broadcast against `cells`.
    ///
    /// Fails before evaluating anything if two cells end up with the same
    /// result name.
    pub fn run_labelled<C, S>(
        &self,
        cells: &Tensor<C>,
        labels: &Tensor<String>,
        sink: &mut S,
    ) -> Result<SweepReport, AnalysisError>
    where
        C: Evaluate + 'static,
        S: ResultSink<C::Output>,
    {
        let paired = cells.apply_binary(labels, |cell, label| (cell, label))?;
        let _span = tracing::info_span!("sweep", prefix = %self.config.prefix, cells = paired.size())
            .entered();
        let names = self.result_names(&paired, labels)?;

        let mut report = SweepReport::default();
        for (cell, name) in paired.iter().zip(names) {
            let (expr, _) = cell.value()?;
            match expr.evaluate() {
                Ok(value) => {
                    sink.store(&name, value)?;
                    report.evaluated += 1;
                }
                Err(error) if self.config.fail_fast => {
                    tracing::error!(name = %name, %error, "missing leaf, aborting sweep");
                    return Err(error.into());
                }
                Err(error) => {
                    tracing::warn!(name = %name, %error, "skipping cell");
                    report.missing.push(MissingCell {
                        linear_index: cell.linear_index,
                        name,
                        error,
                    });
                }
            }
        }

        tracing::info!(
            evaluated = report.evaluated,
            missing = report.missing.len(),
            "sweep finished"
        );
        Ok(report)
    }

    /// Result names in iteration order, rejecting repeats.
    fn result_names<P>(
        &self,
        paired: &Tensor<P>,
        labels: &Tensor<String>,
    ) -> Result<Vec<String>, AnalysisError> {
        let mut seen = HashSet::with_capacity(paired.size());
        let mut names = Vec::with_capacity(paired.size());
        for cell in paired {
            let name = self.config.result_name(&labels.at(&cell.index)?);
            if !seen.insert(name.clone()) {
                tracing::error!(name = %name, "labels do not tell cells apart");
                return Err(AnalysisError::DuplicateResult { name });
            }
            names.push(name);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcorr_core::enumerate;
    use flowcorr_lazy::LeafRequest;
    use std::rc::Rc;

    fn leaves() -> Tensor<LazyValue<f64>> {
        let source = |req: &LeafRequest| -> Result<f64, LazyError> {
            match req.names[0].as_str() {
                "psd2" => Err(LazyError::not_found(req)),
                _ => Ok(1.0),
            }
        };
        let source: Rc<dyn flowcorr_lazy::LeafSource<f64>> = Rc::new(source);
        enumerate("ref", ["psd1", "psd2", "psd3"])
            .tensor()
            .map(move |_, name| LazyValue::fetch(Rc::clone(&source), LeafRequest::new([name], "x1")))
    }

    #[test]
    fn test_missing_leaf_loses_only_its_cell() {
        let mut sink = MemorySink::<f64>::new();
        let report = Sweep::default().run(&leaves(), &mut sink).unwrap();

        assert_eq!(report.evaluated, 2);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].linear_index, 1);
        assert_eq!(report.missing[0].error.request(), "psd2.x1");
        assert_eq!(sink.names().collect::<Vec<_>>(), vec!["{ref=0}", "{ref=2}"]);
        assert_eq!(report.to_string(), "2 of 3 cells evaluated, 1 missing");
    }

    #[test]
    fn test_fail_fast_aborts() {
        let config = SweepConfig {
            fail_fast: true,
            ..SweepConfig::default()
        };
        let mut sink = MemorySink::<f64>::new();
        let err = Sweep::new(config).run(&leaves(), &mut sink).unwrap_err();

        assert!(matches!(err, AnalysisError::Lazy(_)));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_labels_and_prefix() {
        let config = SweepConfig {
            prefix: "R1".to_string(),
            ..SweepConfig::default()
        };
        let labels = enumerate("ref", ["a", "b", "c"]).tensor().map(|_, s| s.to_string());
        let mut sink = MemorySink::<f64>::new();
        Sweep::new(config)
            .run_labelled(&leaves(), &labels, &mut sink)
            .unwrap();

        assert_eq!(sink.get("R1.a"), Some(&1.0));
        assert_eq!(sink.get("R1.b"), None);
        assert_eq!(sink.get("R1.c"), Some(&1.0));
    }

    #[test]
    fn test_label_axis_mismatch_is_structural() {
        let labels = enumerate("ref", ["a", "b"]).tensor().map(|_, s| s.to_string());
        let mut sink = MemorySink::<f64>::new();
        let err = Sweep::default()
            .run_labelled(&leaves(), &labels, &mut sink)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Core(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_labels_missing_a_cell_axis_are_rejected() {
        let cells = enumerate("component", [1.0, 2.0])
            .tensor()
            .map(|_, v| LazyValue::constant(v));
        let cells = cells.apply_binary(&enumerate("ref", [0]), |cell, _| cell).unwrap();
        let labels = enumerate("ref", ["psd1"]).tensor().map(|_, s| s.to_string());
        let mut sink = MemorySink::<f64>::new();

        let err = Sweep::default()
            .run_labelled(&cells, &labels, &mut sink)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateResult { ref name } if name == "psd1"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_labels_with_extra_axes_fan_out() {
        let labels = enumerate("ref", ["a", "b", "c"])
            .tensor()
            .apply_binary(&enumerate("run", ["r1", "r2"]), |r, run| format!("{run}/{r}"))
            .unwrap();
        let mut sink = MemorySink::<f64>::new();
        let report = Sweep::default()
            .run_labelled(&leaves(), &labels, &mut sink)
            .unwrap();

        assert_eq!(report.total(), 6);
        assert_eq!(report.evaluated, 4);
        assert_eq!(sink.get("r2/c"), Some(&1.0));
    }

    #[test]
    fn test_memory_sink_refuses_overwrite() {
        let mut sink = MemorySink::<f64>::new();
        sink.store("v1", 1.0).unwrap();
        let err = sink.store("v1", 2.0).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate result name 'v1'");
        assert_eq!(sink.get("v1"), Some(&1.0));
    }

    #[test]
    fn test_tasks_and_json_lines() {
        let tasks = Tensor::new(flowcorr_core::TensorAxes::single("n", 2), |index| {
            let n = index.get("n").unwrap_or(0) as f64;
            (LazyValue::constant(n) + LazyValue::constant(0.5)).as_function()
        })
        .unwrap();
        let mut sink = JsonLinesSink::new(Vec::new());
        let report = Sweep::default().run(&tasks, &mut sink).unwrap();

        assert!(report.is_complete());
        assert_eq!(sink.written(), 2);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "{\"name\":\"{n=0}\",\"value\":0.5}\n{\"name\":\"{n=1}\",\"value\":1.5}\n"
        );
    }
}
