// Call-counting value sources
// Test doubles for asserting cache behavior: the generator counts every
// invocation, so idempotence-by-scope is observable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use paramgrid_core::{AxisValue, ValueSource};

/// A dynamic source whose generator invocations are counted.
#[derive(Clone)]
pub struct CountingSource {
    values: Vec<AxisValue>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AxisValue>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the generator has run so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Build the dynamic source backed by this counter.
    pub fn source(&self) -> ValueSource {
        let values = self.values.clone();
        let calls = Arc::clone(&self.calls);
        ValueSource::dynamic(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(values.clone())
        })
    }
}
