//! In-memory leaf storage.

use std::cell::Cell;
use std::collections::HashMap;

use flowcorr_lazy::{LazyError, LeafRequest, LeafSource};

/// A [`LeafSource`] backed by a hash map.
///
/// Counts lookups so callers can check that evaluation happened when
/// expected (and how often).
#[derive(Debug)]
pub struct MemoryStore<T> {
    entries: HashMap<LeafRequest, T>,
    fetches: Cell<usize>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fetches: Cell::new(0),
        }
    }

    /// Store a value; returns the previous one for the same request.
    pub fn insert(&mut self, request: LeafRequest, value: T) -> Option<T> {
        self.entries.insert(request, value)
    }

    pub fn contains(&self, request: &LeafRequest) -> bool {
        self.entries.contains_key(request)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups made so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(LeafRequest, T)> for MemoryStore<T> {
    fn from_iter<I: IntoIterator<Item = (LeafRequest, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            fetches: Cell::new(0),
        }
    }
}

impl<T: Clone> LeafSource<T> for MemoryStore<T> {
    fn fetch(&self, request: &LeafRequest) -> Result<T, LazyError> {
        self.fetches.set(self.fetches.get() + 1);
        self.entries
            .get(request)
            .cloned()
            .ok_or_else(|| LazyError::not_found(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_hit_and_miss() {
        let mut store = MemoryStore::new();
        store.insert(LeafRequest::new(["psd1"], "x1"), 0.5);

        assert_eq!(store.fetch(&LeafRequest::new(["psd1"], "x1")), Ok(0.5));
        let err = store.fetch(&LeafRequest::new(["psd1"], "y1")).unwrap_err();
        assert_eq!(err.request(), "psd1.y1");
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn test_from_iter() {
        let store: MemoryStore<f64> = [
            (LeafRequest::new(["a", "b"], "x1x1"), 1.0),
            (LeafRequest::new(["a", "c"], "x1x1"), 2.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 2);
        assert!(store.contains(&LeafRequest::new(["a", "c"], "x1x1")));
        assert_eq!(store.fetch_count(), 0);
    }
}
