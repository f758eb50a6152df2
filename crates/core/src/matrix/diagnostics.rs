// Diagnostic types for matrix construction
// Defines MatrixDiagnostic, AxisDiagnostic, and related types

use serde::{Deserialize, Serialize};

use crate::model::axis::SourceKind;

/// How the matrix rows were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildModeKind {
    CrossProduct,
    ExplicitList,
}

/// Diagnostic information for troubleshooting a build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixDiagnostic {
    pub mode: BuildModeKind,
    pub evaluated_axes: Vec<AxisDiagnostic>,
    pub outcome: BuildOutcome,
    pub row_count: usize,
}

/// Per-axis resolution details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AxisDiagnostic {
    pub axis_name: String,
    pub source_kind: Option<SourceKind>,
    pub value_count: usize,
    pub cache_hit: bool,
}

/// Final outcome status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    Success,
    EmptyAxis,
    MalformedTuple,
    RegistryFailure,
}

impl MatrixDiagnostic {
    /// Create a new diagnostic builder
    pub fn new(mode: BuildModeKind) -> Self {
        Self {
            mode,
            evaluated_axes: Vec::new(),
            outcome: BuildOutcome::Success,
            row_count: 0,
        }
    }

    /// Add an axis evaluation to the diagnostic
    pub fn add_axis_diagnostic(&mut self, diagnostic: AxisDiagnostic) {
        self.evaluated_axes.push(diagnostic);
    }

    /// Set the outcome
    pub fn set_outcome(&mut self, outcome: BuildOutcome) {
        self.outcome = outcome;
    }

    /// Set the emitted row count
    pub fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
    }
}

impl AxisDiagnostic {
    /// Create diagnostic for an axis resolved through the registry
    pub fn resolved(
        axis_name: impl Into<String>,
        source_kind: SourceKind,
        value_count: usize,
        cache_hit: bool,
    ) -> Self {
        Self {
            axis_name: axis_name.into(),
            source_kind: Some(source_kind),
            value_count,
            cache_hit,
        }
    }

    /// Create diagnostic for an axis bound directly by explicit tuples
    pub fn explicit(axis_name: impl Into<String>, value_count: usize) -> Self {
        Self {
            axis_name: axis_name.into(),
            source_kind: None,
            value_count,
            cache_hit: false,
        }
    }
}

/// Determine final diagnostic outcome for a build.
pub fn determine_outcome(
    registry_failed: bool,
    empty_axis: bool,
    malformed_tuple: bool,
) -> BuildOutcome {
    if registry_failed {
        BuildOutcome::RegistryFailure
    } else if empty_axis {
        BuildOutcome::EmptyAxis
    } else if malformed_tuple {
        BuildOutcome::MalformedTuple
    } else {
        BuildOutcome::Success
    }
}
