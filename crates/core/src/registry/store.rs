// Axis registry
// Holds axis definitions and resolves their scope-cached value sequences.
// Override precedence: an explicit override replaces a registered source,
// last write wins, and overriding after resolution in the current scope
// instance is an error.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::model::axis::{Axis, AxisValue, Scope, SourceKind, ValueSource};
use crate::registry::scope::ScopeContext;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("axis '{name}' is already registered with {existing_scope:?} scope; replace its source with an explicit override")]
    DuplicateAxis { name: String, existing_scope: Scope },

    #[error("axis '{name}' is not registered")]
    UnknownAxis { name: String },

    #[error("axis '{name}' failed to evaluate: {reason}")]
    AxisEvaluation { name: String, reason: String },

    #[error("axis '{name}' was already resolved in the current {scope:?} scope; overrides must be applied before resolution")]
    LateOverride { name: String, scope: Scope },

    #[error("axis '{axis}' cannot depend on '{base}': {reason}")]
    InvalidDependency {
        axis: String,
        base: String,
        reason: String,
    },
}

/// Outcome of a single resolve call, retained for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAxisDetail {
    pub values: Vec<AxisValue>,
    pub source_kind: SourceKind,
    pub cache_hit: bool,
}

/// Axis definitions keyed by name.
#[derive(Debug, Default)]
pub struct AxisRegistry {
    axes: HashMap<String, Axis>,
}

impl AxisRegistry {
    pub fn new() -> Self {
        Self {
            axes: HashMap::new(),
        }
    }

    /// Register a new axis. Names are unique across all scopes; a sibling
    /// scope re-using a name is a conflict, not a shadow.
    pub fn register(&mut self, axis: Axis) -> Result<(), RegistryError> {
        if let Some(existing) = self.axes.get(&axis.name) {
            return Err(RegistryError::DuplicateAxis {
                name: axis.name.clone(),
                existing_scope: existing.scope,
            });
        }
        self.validate_dependency(&axis.name, axis.scope, &axis.source)?;
        self.axes.insert(axis.name.clone(), axis);
        Ok(())
    }

    /// Convenience registration for a literal value list.
    pub fn register_literal<I, V>(
        &mut self,
        name: impl Into<String>,
        scope: Scope,
        values: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = V>,
        V: Into<AxisValue>,
    {
        self.register(Axis::new(name, scope, ValueSource::literal(values)))
    }

    /// Replace a registered axis's source. Last write wins; earlier overrides
    /// are discarded. Fails once the axis has resolved in the current scope
    /// instance.
    pub fn override_source(
        &mut self,
        name: &str,
        new_source: ValueSource,
        context: &ScopeContext,
    ) -> Result<(), RegistryError> {
        let scope = match self.axes.get(name) {
            Some(axis) => axis.scope,
            None => {
                return Err(RegistryError::UnknownAxis {
                    name: name.to_string(),
                })
            }
        };
        if context.is_resolved(name, scope) {
            return Err(RegistryError::LateOverride {
                name: name.to_string(),
                scope,
            });
        }
        self.validate_dependency(name, scope, &new_source)?;

        debug!(axis = name, kind = ?new_source.kind(), "axis source overridden");
        if let Some(axis) = self.axes.get_mut(name) {
            axis.source = new_source;
        }
        Ok(())
    }

    /// Resolve an axis to its value sequence, caching per scope instance.
    pub fn resolve(
        &self,
        name: &str,
        context: &mut ScopeContext,
    ) -> Result<Vec<AxisValue>, RegistryError> {
        Ok(self.resolve_with_detail(name, context)?.values)
    }

    /// Resolve an axis and retain source/cache metadata for diagnostics.
    ///
    /// Idempotent by scope: a cache hit never re-invokes a dynamic source.
    pub fn resolve_with_detail(
        &self,
        name: &str,
        context: &mut ScopeContext,
    ) -> Result<ResolvedAxisDetail, RegistryError> {
        let axis = self.axes.get(name).ok_or_else(|| RegistryError::UnknownAxis {
            name: name.to_string(),
        })?;

        if let Some(values) = context.cached(name, axis.scope) {
            return Ok(ResolvedAxisDetail {
                values: values.to_vec(),
                source_kind: axis.source.kind(),
                cache_hit: true,
            });
        }

        let values = self.evaluate_source(name, &axis.source, context)?;
        debug!(axis = name, count = values.len(), "axis source evaluated");
        context.insert(name, axis.scope, values.clone());

        Ok(ResolvedAxisDetail {
            values,
            source_kind: axis.source.kind(),
            cache_hit: false,
        })
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.axes.contains_key(name)
    }

    fn evaluate_source(
        &self,
        name: &str,
        source: &ValueSource,
        context: &mut ScopeContext,
    ) -> Result<Vec<AxisValue>, RegistryError> {
        match source {
            ValueSource::Literal(values) => Ok(values.clone()),
            ValueSource::Dynamic(generator) => {
                generator().map_err(|error| RegistryError::AxisEvaluation {
                    name: name.to_string(),
                    reason: error.to_string(),
                })
            }
            ValueSource::Derived { base, derive } => {
                // Outer scopes resolve first; a cached base is reused as-is.
                let base_values = self.resolve(base, context)?;
                derive(&base_values).map_err(|error| RegistryError::AxisEvaluation {
                    name: name.to_string(),
                    reason: error.to_string(),
                })
            }
        }
    }

    fn validate_dependency(
        &self,
        name: &str,
        scope: Scope,
        source: &ValueSource,
    ) -> Result<(), RegistryError> {
        let ValueSource::Derived { base, .. } = source else {
            return Ok(());
        };
        let Some(base_axis) = self.axes.get(base) else {
            return Err(RegistryError::InvalidDependency {
                axis: name.to_string(),
                base: base.clone(),
                reason: "base axis is not registered".to_string(),
            });
        };
        if !base_axis.scope.encloses(scope) {
            return Err(RegistryError::InvalidDependency {
                axis: name.to_string(),
                base: base.clone(),
                reason: format!(
                    "base scope {:?} is inner to dependant scope {:?}",
                    base_axis.scope, scope
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::anyhow;

    fn counting_source(values: Vec<AxisValue>) -> (ValueSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let source = ValueSource::dynamic(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(values.clone())
        });
        (source, calls)
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = AxisRegistry::new();
        registry
            .register_literal("dataset", Scope::Session, ["alfa"])
            .unwrap();

        let error = registry
            .register_literal("dataset", Scope::Module, ["beta"])
            .unwrap_err();
        assert!(matches!(
            error,
            RegistryError::DuplicateAxis { name, existing_scope: Scope::Session } if name == "dataset"
        ));
    }

    #[test]
    fn resolve_caches_within_one_scope_instance() {
        let (source, calls) = counting_source(vec![AxisValue::from("alfa")]);
        let mut registry = AxisRegistry::new();
        registry
            .register(Axis::new("dataset", Scope::Session, source))
            .unwrap();

        let mut context = ScopeContext::new();
        let first = registry.resolve_with_detail("dataset", &mut context).unwrap();
        let second = registry.resolve_with_detail("dataset", &mut context).unwrap();

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(first.values, second.values);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn function_scope_re_evaluates_per_instance() {
        let (source, calls) = counting_source(vec![AxisValue::from("first")]);
        let mut registry = AxisRegistry::new();
        registry
            .register(Axis::new("attempt", Scope::Function, source))
            .unwrap();

        let mut context = ScopeContext::new();
        context.enter_function();
        registry.resolve("attempt", &mut context).unwrap();
        context.exit_function();
        context.enter_function();
        registry.resolve("attempt", &mut context).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn override_before_resolution_replaces_the_source() {
        let mut registry = AxisRegistry::new();
        registry
            .register_literal("dataset", Scope::Session, ["to-be-ignored"])
            .unwrap();

        let mut context = ScopeContext::new();
        registry
            .override_source(
                "dataset",
                ValueSource::dynamic(|| {
                    Ok(vec![AxisValue::from("SET_01"), AxisValue::from("SET_02")])
                }),
                &context,
            )
            .unwrap();

        let values = registry.resolve("dataset", &mut context).unwrap();
        assert_eq!(
            values,
            vec![AxisValue::from("SET_01"), AxisValue::from("SET_02")]
        );
    }

    #[test]
    fn late_override_is_rejected_until_the_scope_expires() {
        let mut registry = AxisRegistry::new();
        registry
            .register_literal("loc_id", Scope::Module, ["loc_a"])
            .unwrap();

        let mut context = ScopeContext::new();
        context.enter_module();
        registry.resolve("loc_id", &mut context).unwrap();

        let error = registry
            .override_source("loc_id", ValueSource::literal(["loc_b"]), &context)
            .unwrap_err();
        assert!(matches!(
            error,
            RegistryError::LateOverride { scope: Scope::Module, .. }
        ));

        context.exit_module();
        registry
            .override_source("loc_id", ValueSource::literal(["loc_b"]), &context)
            .unwrap();
        context.enter_module();
        assert_eq!(
            registry.resolve("loc_id", &mut context).unwrap(),
            vec![AxisValue::from("loc_b")]
        );
    }

    #[test]
    fn last_override_wins() {
        let mut registry = AxisRegistry::new();
        registry
            .register_literal("dataset", Scope::Session, ["original"])
            .unwrap();

        let mut context = ScopeContext::new();
        registry
            .override_source("dataset", ValueSource::literal(["discarded"]), &context)
            .unwrap();
        registry
            .override_source("dataset", ValueSource::literal(["kept"]), &context)
            .unwrap();

        assert_eq!(
            registry.resolve("dataset", &mut context).unwrap(),
            vec![AxisValue::from("kept")]
        );
    }

    #[test]
    fn override_of_unregistered_axis_is_rejected() {
        let mut registry = AxisRegistry::new();
        let context = ScopeContext::new();
        let error = registry
            .override_source("missing", ValueSource::literal(["x"]), &context)
            .unwrap_err();
        assert!(matches!(error, RegistryError::UnknownAxis { .. }));
    }

    #[test]
    fn failing_generator_surfaces_axis_evaluation_error() {
        let mut registry = AxisRegistry::new();
        registry
            .register(Axis::new(
                "dataset",
                Scope::Session,
                ValueSource::dynamic(|| Err(anyhow!("catalog unavailable"))),
            ))
            .unwrap();

        let mut context = ScopeContext::new();
        let error = registry.resolve("dataset", &mut context).unwrap_err();
        assert!(matches!(
            error,
            RegistryError::AxisEvaluation { ref reason, .. } if reason.contains("catalog unavailable")
        ));
    }

    #[test]
    fn derived_axis_resolves_its_base_first() {
        let (source, calls) = counting_source(vec![
            AxisValue::from("alfa"),
            AxisValue::from("beta"),
        ]);
        let mut registry = AxisRegistry::new();
        registry
            .register(Axis::new("dataset_name", Scope::Session, source))
            .unwrap();
        registry
            .register(Axis::new(
                "dataset",
                Scope::Module,
                ValueSource::derived("dataset_name", |values| {
                    Ok(values
                        .iter()
                        .map(|v| AxisValue::Str(format!("{v}_resolved")))
                        .collect())
                }),
            ))
            .unwrap();

        let mut context = ScopeContext::new();
        context.enter_module();
        let values = registry.resolve("dataset", &mut context).unwrap();
        assert_eq!(
            values,
            vec![
                AxisValue::from("alfa_resolved"),
                AxisValue::from("beta_resolved")
            ]
        );

        // Module re-entry re-derives but reuses the cached session base.
        context.enter_module();
        registry.resolve("dataset", &mut context).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn derived_axis_requires_a_registered_base() {
        let mut registry = AxisRegistry::new();
        let error = registry
            .register(Axis::new(
                "dataset",
                Scope::Module,
                ValueSource::derived("dataset_name", |values| Ok(values.to_vec())),
            ))
            .unwrap_err();
        assert!(matches!(error, RegistryError::InvalidDependency { .. }));
    }

    #[test]
    fn derived_axis_rejects_an_inner_scoped_base() {
        let mut registry = AxisRegistry::new();
        registry
            .register_literal("attempt", Scope::Function, ["first"])
            .unwrap();

        let error = registry
            .register(Axis::new(
                "dataset",
                Scope::Session,
                ValueSource::derived("attempt", |values| Ok(values.to_vec())),
            ))
            .unwrap_err();
        assert!(matches!(
            error,
            RegistryError::InvalidDependency { ref reason, .. } if reason.contains("inner")
        ));
    }
}
