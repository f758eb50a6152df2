// Scope-bound cache layering
// A ScopeContext owns one cache layer per live scope instance. Exiting a
// scope clears its layer and every inner layer; outer layers are untouched
// when an inner scope re-enters.

use std::collections::HashMap;

use uuid::Uuid;

use crate::model::axis::{AxisValue, Scope};

#[derive(Debug, Clone)]
struct ScopeInstance {
    id: Uuid,
    cache: HashMap<String, Vec<AxisValue>>,
}

impl ScopeInstance {
    fn fresh() -> Self {
        Self {
            id: Uuid::now_v7(),
            cache: HashMap::new(),
        }
    }
}

/// Live scope instances and their resolved-axis caches.
///
/// The session layer is always live; module and function layers are entered
/// explicitly (or implicitly on first resolution of an axis at that scope).
#[derive(Debug, Clone)]
pub struct ScopeContext {
    session: ScopeInstance,
    module: Option<ScopeInstance>,
    function: Option<ScopeInstance>,
}

impl ScopeContext {
    pub fn new() -> Self {
        Self {
            session: ScopeInstance::fresh(),
            module: None,
            function: None,
        }
    }

    /// Start a new module instance. Any previous module/function caches expire.
    pub fn enter_module(&mut self) {
        self.module = Some(ScopeInstance::fresh());
        self.function = None;
    }

    pub fn exit_module(&mut self) {
        self.module = None;
        self.function = None;
    }

    /// Start a new function instance. A previous function cache expires.
    pub fn enter_function(&mut self) {
        self.function = Some(ScopeInstance::fresh());
    }

    pub fn exit_function(&mut self) {
        self.function = None;
    }

    /// Instance id of the live layer for `scope`, if one is active.
    pub fn instance_id(&self, scope: Scope) -> Option<Uuid> {
        self.layer(scope).map(|instance| instance.id)
    }

    /// True when `name` has a cached binding in the live layer for `scope`.
    pub fn is_resolved(&self, name: &str, scope: Scope) -> bool {
        self.cached(name, scope).is_some()
    }

    pub(crate) fn cached(&self, name: &str, scope: Scope) -> Option<&[AxisValue]> {
        self.layer(scope)
            .and_then(|instance| instance.cache.get(name))
            .map(Vec::as_slice)
    }

    pub(crate) fn insert(&mut self, name: &str, scope: Scope, values: Vec<AxisValue>) {
        self.layer_mut(scope).cache.insert(name.to_string(), values);
    }

    fn layer(&self, scope: Scope) -> Option<&ScopeInstance> {
        match scope {
            Scope::Session => Some(&self.session),
            Scope::Module => self.module.as_ref(),
            Scope::Function => self.function.as_ref(),
        }
    }

    fn layer_mut(&mut self, scope: Scope) -> &mut ScopeInstance {
        match scope {
            Scope::Session => &mut self.session,
            Scope::Module => self.module.get_or_insert_with(ScopeInstance::fresh),
            Scope::Function => self.function.get_or_insert_with(ScopeInstance::fresh),
        }
    }
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self::new()
    }
}
