//! # External Leaves
//!
//! A leaf fetch names a persisted quantity and asks a [`LeafSource`] for it
//! when, and only when, the expression is evaluated. The source lives
//! outside this crate: it may read a file, query a store, or fail because the
//! quantity was never produced.
//!
//! A [`LeafRequest`] identifies the quantity by a sequence of named
//! sub-quantities (e.g. the two Q-vectors of a correlation) plus the
//! arithmetic component that is wanted (e.g. `x1x1`).

use std::fmt;
use std::rc::Rc;

use crate::error::LazyError;

/// Identifies one persisted quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafRequest {
    /// Named sub-quantities, in order.
    pub names: Vec<String>,
    /// Requested arithmetic component.
    pub component: String,
}

impl LeafRequest {
    pub fn new<I, S>(names: I, component: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            component: component.into(),
        }
    }
}

impl fmt::Display for LeafRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.names.join("_"), self.component)
    }
}

/// Resolves leaf requests to values.
pub trait LeafSource<T> {
    /// Look up the quantity. A missing quantity is
    /// [`LazyError::LeafFetchFailed`].
    fn fetch(&self, request: &LeafRequest) -> Result<T, LazyError>;
}

impl<T, F> LeafSource<T> for F
where
    F: Fn(&LeafRequest) -> Result<T, LazyError>,
{
    fn fetch(&self, request: &LeafRequest) -> Result<T, LazyError> {
        self(request)
    }
}

/// A request bound to the source that will resolve it.
pub struct Leaf<T> {
    request: LeafRequest,
    source: Rc<dyn LeafSource<T>>,
}

impl<T> Leaf<T> {
    pub fn new(source: Rc<dyn LeafSource<T>>, request: LeafRequest) -> Self {
        Self { request, source }
    }

    pub fn request(&self) -> &LeafRequest {
        &self.request
    }

    /// Perform the lookup.
    pub fn fetch(&self) -> Result<T, LazyError> {
        tracing::trace!(request = %self.request, "fetching leaf");
        self.source.fetch(&self.request)
    }
}

impl<T> Clone for Leaf<T> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            source: Rc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Leaf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
