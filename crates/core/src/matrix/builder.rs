// Matrix builder - combines resolved axes into ordered parameter tuples
// This module implements the build() entry point that resolves requested
// axes, validates their sequences, and emits the final matrix.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::matrix::diagnostics::{
    determine_outcome, AxisDiagnostic, BuildModeKind, MatrixDiagnostic,
};
use crate::model::axis::AxisValue;
use crate::model::tuple::ParamTuple;
use crate::registry::scope::ScopeContext;
use crate::registry::store::{AxisRegistry, RegistryError};

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("axis '{name}' resolved to an empty value sequence")]
    EmptyAxis {
        name: String,
        diagnostic: MatrixDiagnostic,
    },

    #[error("explicit tuple list is empty; a zero-row matrix is a configuration error")]
    EmptyExplicitList { diagnostic: MatrixDiagnostic },

    #[error("explicit tuple at row {index} does not bind the requested axes: {reason}")]
    MalformedTuple {
        index: usize,
        reason: String,
        diagnostic: MatrixDiagnostic,
    },

    #[error("axis resolution failed")]
    Registry {
        #[source]
        source: RegistryError,
        diagnostic: MatrixDiagnostic,
    },
}

/// How build() combines the requested axes.
#[derive(Debug)]
pub enum BuildMode {
    /// Full Cartesian product; the first requested axis varies slowest.
    CrossProduct,
    /// Hand-curated rows supplied by the caller; per-axis combination is
    /// bypassed. Each tuple must bind exactly the requested axes in order.
    ExplicitList(Vec<ParamTuple>),
}

/// Result of a matrix build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixResult {
    pub tuples: Vec<ParamTuple>,
    pub diagnostic: MatrixDiagnostic,
}

/// Build the ordered matrix for the requested axes.
///
/// Output ordering is deterministic for identical registry state, so an
/// index-based selection of a subset stays stable across repeated builds.
pub fn build(
    requested_axis_names: &[&str],
    registry: &AxisRegistry,
    context: &mut ScopeContext,
    mode: BuildMode,
) -> Result<MatrixResult, MatrixError> {
    match mode {
        BuildMode::CrossProduct => build_cross_product(requested_axis_names, registry, context),
        BuildMode::ExplicitList(tuples) => build_explicit(requested_axis_names, tuples),
    }
}

fn build_cross_product(
    requested_axis_names: &[&str],
    registry: &AxisRegistry,
    context: &mut ScopeContext,
) -> Result<MatrixResult, MatrixError> {
    let mut diagnostic = MatrixDiagnostic::new(BuildModeKind::CrossProduct);
    let mut sequences: Vec<(String, Vec<AxisValue>)> =
        Vec::with_capacity(requested_axis_names.len());

    for name in requested_axis_names {
        let detail = registry
            .resolve_with_detail(name, context)
            .map_err(|source| {
                diagnostic.set_outcome(determine_outcome(true, false, false));
                MatrixError::Registry {
                    source,
                    diagnostic: diagnostic.clone(),
                }
            })?;

        diagnostic.add_axis_diagnostic(AxisDiagnostic::resolved(
            *name,
            detail.source_kind,
            detail.values.len(),
            detail.cache_hit,
        ));

        if detail.values.is_empty() {
            diagnostic.set_outcome(determine_outcome(false, true, false));
            return Err(MatrixError::EmptyAxis {
                name: (*name).to_string(),
                diagnostic,
            });
        }

        sequences.push(((*name).to_string(), detail.values));
    }

    let tuples = cross_product(&sequences);
    debug!(rows = tuples.len(), "matrix build complete");
    diagnostic.set_row_count(tuples.len());

    Ok(MatrixResult { tuples, diagnostic })
}

/// Emit the Cartesian product with the last axis cycling fastest.
///
/// With no axes the product has exactly one empty row: an unparametrized
/// test body is still invoked once.
fn cross_product(sequences: &[(String, Vec<AxisValue>)]) -> Vec<ParamTuple> {
    let total: usize = sequences.iter().map(|(_, values)| values.len()).product();
    let mut tuples = Vec::with_capacity(total);
    let mut indices = vec![0usize; sequences.len()];

    for _ in 0..total {
        let entries = sequences
            .iter()
            .zip(&indices)
            .map(|((name, values), &index)| (name.clone(), values[index].clone()))
            .collect();
        tuples.push(ParamTuple::new(entries));

        for position in (0..indices.len()).rev() {
            indices[position] += 1;
            if indices[position] < sequences[position].1.len() {
                break;
            }
            indices[position] = 0;
        }
    }

    tuples
}

fn build_explicit(
    requested_axis_names: &[&str],
    tuples: Vec<ParamTuple>,
) -> Result<MatrixResult, MatrixError> {
    let mut diagnostic = MatrixDiagnostic::new(BuildModeKind::ExplicitList);

    if tuples.is_empty() {
        diagnostic.set_outcome(determine_outcome(false, true, false));
        return Err(MatrixError::EmptyExplicitList { diagnostic });
    }

    for (index, tuple) in tuples.iter().enumerate() {
        let bound: Vec<&str> = tuple.axis_names().collect();
        if bound != requested_axis_names {
            diagnostic.set_outcome(determine_outcome(false, false, true));
            return Err(MatrixError::MalformedTuple {
                index,
                reason: format!(
                    "expected axes [{}], found [{}]",
                    requested_axis_names.join(", "),
                    bound.join(", ")
                ),
                diagnostic,
            });
        }
    }

    for name in requested_axis_names {
        let mut distinct: Vec<&AxisValue> = Vec::new();
        for tuple in &tuples {
            if let Some(value) = tuple.get(name) {
                if !distinct.contains(&value) {
                    distinct.push(value);
                }
            }
        }
        diagnostic.add_axis_diagnostic(AxisDiagnostic::explicit(*name, distinct.len()));
    }

    debug!(rows = tuples.len(), "explicit matrix accepted");
    diagnostic.set_row_count(tuples.len());

    Ok(MatrixResult { tuples, diagnostic })
}
