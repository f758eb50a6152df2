//! Axis registry and scope-bound value caching.
//!
//! This module holds axis definitions, evaluates their sources lazily, and
//! caches the resulting value sequences per scope instance.
//!
//! # Example
//!
//! ```ignore
//! use paramgrid_core::registry::scope::ScopeContext;
//! use paramgrid_core::registry::store::AxisRegistry;
//!
//! let values = registry.resolve("dataset", &mut context)?;
//! assert!(!values.is_empty());
//! ```
pub mod scope;
pub mod store;

/// Registry submodule identifier.
pub fn module_name() -> &'static str {
    "registry"
}
