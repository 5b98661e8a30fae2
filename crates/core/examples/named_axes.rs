//! Named Axes - Broadcasting by Name
//!
//! Run with: cargo run --example named_axes
//!
//! This example demonstrates:
//! - Creating axes from value lists
//! - Combining tensors whose axis sets differ
//! - Reducing over a subset of axes

use flowcorr_core::{enumerate, tensorize_apply2, CoreError};

fn main() -> Result<(), CoreError> {
    println!("=== Named Axes ===\n");

    // -------------------------------------------------------------------------
    // Axes
    // -------------------------------------------------------------------------
    println!("1. Axes");
    println!("-------");

    let reference = enumerate("ref", ["psd1", "psd2", "psd3"]);
    let weight = enumerate("weight", [0.5, 1.0]);
    println!("{}", reference);
    println!("{}", weight);
    println!();

    // -------------------------------------------------------------------------
    // Broadcasting
    // -------------------------------------------------------------------------
    println!("2. Broadcasting");
    println!("---------------");

    let labelled = tensorize_apply2(
        |r: &str, w: f64| format!("{}*{}", w, r),
        &reference,
        &weight,
    )?;
    println!("shape: {}", labelled.axes());
    for cell in &labelled {
        println!("  {:<24} {}", cell.index.to_string(), cell.value()?);
    }

    let other = enumerate("ref", ["a", "b"]);
    match tensorize_apply2(|x: &str, y: &str| (x, y), &reference, &other) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("mismatch: {}", e),
    }
    println!();

    // -------------------------------------------------------------------------
    // Reduction
    // -------------------------------------------------------------------------
    println!("3. Reduction");
    println!("------------");

    let counts = enumerate("ref", [1.0, 2.0, 3.0]).tensor();
    let table = (&counts * &weight)?;
    let per_weight = table.accumulate_axes(&["ref"], 0.0, |acc, v| acc + v)?;
    println!("summed over ref: {:?}", per_weight.materialize()?);

    Ok(())
}
