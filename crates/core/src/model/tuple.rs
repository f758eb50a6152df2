// Parameter tuple types
// One ParamTuple binds every requested axis to a single value for one
// test invocation. Immutable once constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::axis::AxisValue;

/// One fully resolved combination of axis values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamTuple {
    entries: Vec<(String, AxisValue)>,
}

impl ParamTuple {
    pub fn new(entries: Vec<(String, AxisValue)>) -> Self {
        Self { entries }
    }

    /// Look up the value bound to an axis name.
    pub fn get(&self, name: &str) -> Option<&AxisValue> {
        self.entries
            .iter()
            .find(|(axis, _)| axis == name)
            .map(|(_, value)| value)
    }

    /// Axis names in binding order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(axis, _)| axis.as_str())
    }

    pub fn entries(&self) -> &[(String, AxisValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable human-readable identifier, e.g. `dataset=SET_01,loc_id=loc_a`.
    pub fn case_id(&self) -> String {
        self.entries
            .iter()
            .map(|(axis, value)| format!("{axis}={value}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for ParamTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.case_id())
    }
}
