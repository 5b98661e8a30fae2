//! # Observable Recipes
//!
//! Builders for the tensors a flow analysis is made of. Nothing here
//! evaluates anything: every function returns a tensor of expressions whose
//! leaves point into a [`LeafSource`].
//!
//! ## Three-subevent resolution
//!
//! With three reference detectors `a`, `b`, `c` the resolution of `a` is
//!
//! ```text
//! R_a = sqrt( <Q_a Q_b> * <Q_a Q_c> / <Q_b Q_c> )
//! ```
//!
//! The reference axis is cloned into three independently indexable slots
//! (`ref`, `ref_b`, `ref_c`) so the same detector list can fill every role.
//! Cells where two slots name the same detector ask for correlations that
//! are normally never produced, and are skipped by a tolerant sweep.

use std::fmt;
use std::ops::{Div, Mul};
use std::rc::Rc;

use flowcorr_core::{sqrt, tensorize_apply, CoreError, Enumeration, Sqrt, Tensor};
use flowcorr_lazy::{fetch_tensor, LazyValue, LeafRequest, LeafSource};

/// Arithmetic component of a Q-vector for one harmonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    X(u32),
    Y(u32),
}

impl Component {
    /// Both components of each harmonic, `x` before `y`.
    pub fn for_harmonics(harmonics: &[u32]) -> Vec<Component> {
        harmonics
            .iter()
            .flat_map(|&n| [Component::X(n), Component::Y(n)])
            .collect()
    }

    pub fn harmonic(&self) -> u32 {
        match self {
            Component::X(n) | Component::Y(n) => *n,
        }
    }

    /// Component of the product of two vectors in this component, e.g. `x1x1`.
    pub fn squared(&self) -> String {
        format!("{}{}", self, self)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::X(n) => write!(f, "x{}", n),
            Component::Y(n) => write!(f, "y{}", n),
        }
    }
}

/// Component axis rendered as strings, ready for [`correlation_tensor`].
pub fn component_axis(name: impl Into<String>, components: &[Component]) -> Enumeration<String> {
    Enumeration::new(name, components.iter().map(Component::to_string))
}

/// Tensor of leaf fetches for a correlation between named quantities.
///
/// Each element of `names` supplies one sub-quantity name per cell; the
/// result lives on the merged shape of all name tensors and `component`.
pub fn correlation_tensor<T: 'static>(
    source: Rc<dyn LeafSource<T>>,
    names: Vec<Tensor<String>>,
    component: Tensor<String>,
) -> Result<Tensor<LazyValue<T>>, CoreError> {
    let joined = tensorize_apply(|parts: Vec<String>| parts, names)?;
    let requests = joined.apply_binary(component, |parts, component| {
        LeafRequest::new(parts, component)
    })?;
    Ok(fetch_tensor(source, &requests))
}

/// Resolution of every reference detector from the other two.
///
/// The result has the axes `{ref, ref_b, ref_c, <component>}` where `ref` is
/// the name of `reference`. Leaves ask for the doubled component (`x1x1`).
pub fn three_subevent_resolution<T>(
    source: Rc<dyn LeafSource<T>>,
    reference: &Enumeration<String>,
    component: &Enumeration<String>,
) -> Result<Tensor<LazyValue<T>>, CoreError>
where
    T: Mul<Output = T> + Div<Output = T> + Sqrt<Output = T> + Clone + 'static,
{
    let a = reference.tensor();
    let b = reference.clone_as(format!("{}_b", reference.name())).tensor();
    let c = reference.clone_as(format!("{}_c", reference.name())).tensor();
    let doubled = component.tensor().map(|_, name| format!("{}{}", name, name));

    let ab = correlation_tensor(
        Rc::clone(&source),
        vec![a.clone(), b.clone()],
        doubled.clone(),
    )?;
    let ac = correlation_tensor(Rc::clone(&source), vec![a, c.clone()], doubled.clone())?;
    let bc = correlation_tensor(source, vec![b, c], doubled)?;

    tracing::debug!(reference = %reference, component = %component, "resolution recipe");
    sqrt((ab * &ac)? / &bc)
}

/// Flow coefficient `<u Q> / R`, broadcast by axis name.
pub fn flow_coefficient<T>(
    correlation: &Tensor<LazyValue<T>>,
    resolution: &Tensor<LazyValue<T>>,
) -> Result<Tensor<LazyValue<T>>, CoreError>
where
    T: Div<Output = T> + Clone + 'static,
{
    correlation / resolution
}
