// In-memory resolution trace for harness runs

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TraceError;

/// A recorded registry or builder action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum EventKind {
    AxisRegistered { axis: String },
    AxisResolved { axis: String, cache_hit: bool },
    AxisOverridden { axis: String },
    MatrixBuilt { rows: usize },
    CaseFinished { case_id: String, passed: bool },
}

/// In-memory resolution-event recorder
#[derive(Clone)]
pub struct InMemoryTraceRecorder {
    events: Arc<Mutex<Vec<ResolutionEvent>>>,
}

impl InMemoryTraceRecorder {
    /// Create a new in-memory trace recorder
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all collected events
    pub fn get_events(&self) -> Vec<ResolutionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Clear all collected events
    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    pub fn record(&self, kind: EventKind) -> Result<(), TraceError> {
        self.events
            .lock()
            .map_err(|error| TraceError::LockPoisoned {
                message: error.to_string(),
            })?
            .push(ResolutionEvent {
                at: Utc::now(),
                kind,
            });
        Ok(())
    }
}

impl Default for InMemoryTraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_events_are_returned_in_order() {
        let recorder = InMemoryTraceRecorder::new();
        recorder
            .record(EventKind::AxisRegistered {
                axis: "dataset".to_string(),
            })
            .unwrap();
        recorder
            .record(EventKind::MatrixBuilt { rows: 4 })
            .unwrap();

        let events = recorder.get_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].kind,
            EventKind::AxisRegistered {
                axis: "dataset".to_string()
            }
        );
        assert_eq!(events[1].kind, EventKind::MatrixBuilt { rows: 4 });
    }

    #[test]
    fn clear_empties_the_log() {
        let recorder = InMemoryTraceRecorder::new();
        recorder
            .record(EventKind::MatrixBuilt { rows: 1 })
            .unwrap();
        recorder.clear();
        assert!(recorder.get_events().is_empty());
    }

    #[test]
    fn clones_share_the_same_log() {
        let recorder = InMemoryTraceRecorder::new();
        let shared = recorder.clone();
        shared
            .record(EventKind::AxisOverridden {
                axis: "dataset".to_string(),
            })
            .unwrap();
        assert_eq!(recorder.get_events().len(), 1);
    }
}
