//! Directed flow v1 from three reference detectors
//!
//! Run with: cargo run --example flow_v1 [config.json]
//!
//! This example demonstrates:
//! - Filling a leaf store with measured correlations
//! - Building the resolution and flow-coefficient tensors lazily
//! - Sweeping them, skipping cells whose inputs were never produced

use std::rc::Rc;

use flowcorr_analysis::{
    component_axis, correlation_tensor, flow_coefficient, init_tracing,
    three_subevent_resolution, AnalysisConfig, AnalysisError, Component, MemorySink, MemoryStore,
    Sweep,
};
use flowcorr_core::{enumerate, Enumeration};
use flowcorr_lazy::{LazyTensorExt, LeafRequest, LeafSource};

fn names(axis: &str, values: &[&str]) -> Enumeration<String> {
    enumerate(axis, values.iter().map(|v| v.to_string()))
}

fn main() -> Result<(), AnalysisError> {
    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };
    init_tracing(&config.logging)?;

    println!("=== Flow v1 ===\n");

    // -------------------------------------------------------------------------
    // Measured correlations
    // -------------------------------------------------------------------------
    println!("1. Leaf store");
    println!("-------------");

    let detectors = ["psd1", "psd2", "psd3"];
    let components = Component::for_harmonics(&[1]);
    let mut store = MemoryStore::<f64>::new();
    for component in &components {
        let squared = component.squared();
        store.insert(LeafRequest::new(["psd1", "psd2"], squared.as_str()), 0.045);
        store.insert(LeafRequest::new(["psd1", "psd3"], squared.as_str()), 0.020);
        store.insert(LeafRequest::new(["psd2", "psd3"], squared.as_str()), 0.010);
        for detector in detectors {
            store.insert(LeafRequest::new(["pt", detector], squared.as_str()), 0.003);
        }
    }
    println!("{} correlations stored\n", store.len());
    let store = Rc::new(store);
    let source: Rc<dyn LeafSource<f64>> = store.clone();

    // -------------------------------------------------------------------------
    // Recipes
    // -------------------------------------------------------------------------
    println!("2. Recipes");
    println!("----------");

    let reference = names("ref", &detectors);
    let component = component_axis("component", &components);
    let resolution = three_subevent_resolution(Rc::clone(&source), &reference, &component)?;
    let squared = component.tensor().map(|_, c| format!("{}{}", c, c));
    let correlation = correlation_tensor(
        source,
        vec![names("tracks", &["pt"]).tensor(), reference.tensor()],
        squared,
    )?;
    let flow = flow_coefficient(&correlation, &resolution)?;

    println!("resolution axes: {}", resolution.axes());
    println!("flow axes:       {}", flow.axes());
    println!("first cell:      {}", flow.at_linear(0)?);
    println!("leaves fetched so far: {}\n", store.fetch_count());

    // -------------------------------------------------------------------------
    // Sweep
    // -------------------------------------------------------------------------
    println!("3. Sweep");
    println!("--------");

    let labels = flow.as_functions().map(|_, task| task.name().to_string());
    let mut sink = MemorySink::<f64>::new();
    let report = Sweep::new(config.sweep).run_labelled(&flow, &labels, &mut sink)?;

    println!("{}", report);
    for (name, value) in sink.into_inner() {
        println!("{:>10.5}  {}", value, name);
    }
    println!("leaves fetched: {}", store.fetch_count());

    Ok(())
}
