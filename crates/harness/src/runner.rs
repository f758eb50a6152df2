// Case runner
// Binds each matrix row to a test body and collects per-case outcomes.
// One CollectionUnit corresponds to one module-scope instance; each bound
// case runs inside its own function-scope instance.

use paramgrid_core::{
    build, Axis, AxisRegistry, BuildMode, MatrixDiagnostic, ParamTuple, ScopeContext, ValueSource,
};
use serde::{Deserialize, Serialize};

use crate::errors::RunError;
use crate::plan::AxisPlan;
use crate::trace::{EventKind, InMemoryTraceRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
}

/// Outcome of one bound test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case_id: String,
    pub tuple: ParamTuple,
    pub status: CaseStatus,
    pub message: Option<String>,
}

/// Result of running a full collection unit.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<CaseOutcome>,
    pub diagnostic: MatrixDiagnostic,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == CaseStatus::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// One collection unit: a registry, its scope context, and a trace log.
pub struct CollectionUnit {
    registry: AxisRegistry,
    context: ScopeContext,
    trace: InMemoryTraceRecorder,
}

impl CollectionUnit {
    pub fn new() -> Self {
        Self::with_trace(InMemoryTraceRecorder::new())
    }

    /// Create a unit that records into a shared trace log.
    pub fn with_trace(trace: InMemoryTraceRecorder) -> Self {
        let mut context = ScopeContext::new();
        context.enter_module();
        Self {
            registry: AxisRegistry::new(),
            context,
            trace,
        }
    }

    pub fn register(&mut self, axis: Axis) -> Result<(), RunError> {
        let name = axis.name.clone();
        self.registry.register(axis)?;
        self.trace.record(EventKind::AxisRegistered { axis: name })?;
        Ok(())
    }

    /// Register every axis a plan declares.
    pub fn apply_plan(&mut self, plan: &AxisPlan) -> Result<(), RunError> {
        plan.apply(&mut self.registry)?;
        for axis in &plan.axes {
            self.trace.record(EventKind::AxisRegistered {
                axis: axis.name.clone(),
            })?;
        }
        Ok(())
    }

    /// Replace a registered axis's source before any resolution.
    pub fn override_axis(&mut self, name: &str, source: ValueSource) -> Result<(), RunError> {
        self.registry
            .override_source(name, source, &self.context)?;
        self.trace.record(EventKind::AxisOverridden {
            axis: name.to_string(),
        })?;
        Ok(())
    }

    pub fn registry(&self) -> &AxisRegistry {
        &self.registry
    }

    pub fn trace(&self) -> &InMemoryTraceRecorder {
        &self.trace
    }

    /// Build the matrix and invoke `body` once per tuple, in matrix order.
    ///
    /// A failing body marks its case failed and the run continues; errors
    /// from matrix construction abort before any case runs.
    pub fn run<F>(
        &mut self,
        requested_axis_names: &[&str],
        mode: BuildMode,
        body: F,
    ) -> Result<RunReport, RunError>
    where
        F: Fn(&ParamTuple) -> anyhow::Result<()>,
    {
        let result = build(requested_axis_names, &self.registry, &mut self.context, mode)?;

        for axis in &result.diagnostic.evaluated_axes {
            if axis.source_kind.is_some() {
                self.trace.record(EventKind::AxisResolved {
                    axis: axis.axis_name.clone(),
                    cache_hit: axis.cache_hit,
                })?;
            }
        }
        self.trace.record(EventKind::MatrixBuilt {
            rows: result.tuples.len(),
        })?;

        let mut outcomes = Vec::with_capacity(result.tuples.len());
        for tuple in result.tuples {
            self.context.enter_function();
            let (status, message) = match body(&tuple) {
                Ok(()) => (CaseStatus::Passed, None),
                Err(error) => (CaseStatus::Failed, Some(error.to_string())),
            };
            self.context.exit_function();

            let case_id = tuple.case_id();
            self.trace.record(EventKind::CaseFinished {
                case_id: case_id.clone(),
                passed: status == CaseStatus::Passed,
            })?;
            outcomes.push(CaseOutcome {
                case_id,
                tuple,
                status,
                message,
            });
        }

        Ok(RunReport {
            outcomes,
            diagnostic: result.diagnostic,
        })
    }
}

impl Default for CollectionUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use paramgrid_core::Scope;

    fn unit_2x2() -> CollectionUnit {
        let mut unit = CollectionUnit::new();
        unit.register(Axis::new(
            "dataset",
            Scope::Session,
            ValueSource::literal(["SET_01", "SET_02"]),
        ))
        .unwrap();
        unit.register(Axis::new(
            "loc_id",
            Scope::Session,
            ValueSource::literal(["loc_a", "loc_b"]),
        ))
        .unwrap();
        unit
    }

    #[test]
    fn run_invokes_the_body_once_per_tuple() {
        let mut unit = unit_2x2();
        let report = unit
            .run(&["dataset", "loc_id"], BuildMode::CrossProduct, |_| Ok(()))
            .unwrap();

        assert_eq!(report.outcomes.len(), 4);
        assert!(report.all_passed());
        assert_eq!(report.outcomes[0].case_id, "dataset=SET_01,loc_id=loc_a");
    }

    #[test]
    fn failing_case_does_not_abort_the_run() {
        let mut unit = unit_2x2();
        let report = unit
            .run(&["dataset", "loc_id"], BuildMode::CrossProduct, |tuple| {
                if tuple.case_id() == "dataset=SET_02,loc_id=loc_a" {
                    bail!("known-bad combination");
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 1);
        let failed = report
            .outcomes
            .iter()
            .find(|outcome| outcome.status == CaseStatus::Failed)
            .unwrap();
        assert_eq!(
            failed.message.as_deref(),
            Some("known-bad combination")
        );
    }

    #[test]
    fn run_records_resolution_and_case_events() {
        let mut unit = unit_2x2();
        unit.run(&["dataset", "loc_id"], BuildMode::CrossProduct, |_| Ok(()))
            .unwrap();

        let events = unit.trace().get_events();
        assert!(events.iter().any(|event| matches!(
            event.kind,
            EventKind::AxisResolved { ref axis, cache_hit: false } if axis == "dataset"
        )));
        assert!(events
            .iter()
            .any(|event| event.kind == EventKind::MatrixBuilt { rows: 4 }));
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event.kind, EventKind::CaseFinished { .. }))
                .count(),
            4
        );
    }
}
