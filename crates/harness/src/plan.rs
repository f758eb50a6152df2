// Axis plan documents
// Declarative axis configuration loaded from YAML or JSON and applied to a
// registry. Plans carry literal value lists only; dynamic and derived
// sources are registered in code.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use paramgrid_core::{AxisRegistry, AxisValue, RegistryError, Scope};
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

type Result<T> = std::result::Result<T, PlanError>;

/// One declared axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisDef {
    pub name: String,
    #[serde(default = "default_scope")]
    pub scope: Scope,
    pub values: Vec<AxisValue>,
}

fn default_scope() -> Scope {
    Scope::Function
}

/// Declarative axis configuration for one collection unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisPlan {
    pub axes: Vec<AxisDef>,
}

impl AxisPlan {
    /// Parse and validate a plan from a YAML document.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let plan: AxisPlan = serde_yaml::from_str(raw).map_err(|error| PlanError::Parse {
            message: error.to_string(),
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Parse and validate a plan from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let plan: AxisPlan = serde_json::from_str(raw).map_err(|error| PlanError::Parse {
            message: error.to_string(),
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Load a plan from disk; `.json` parses as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&raw)
        } else {
            Self::from_yaml(&raw)
        }
    }

    /// Validate the plan structure.
    pub fn validate(&self) -> Result<()> {
        if self.axes.is_empty() {
            return Err(PlanError::NoAxes);
        }

        let mut seen = HashSet::new();
        for (index, axis) in self.axes.iter().enumerate() {
            if axis.name.is_empty() {
                return Err(PlanError::EmptyName { index });
            }
            if !seen.insert(axis.name.as_str()) {
                return Err(PlanError::DuplicateName {
                    name: axis.name.clone(),
                });
            }
            if axis.values.is_empty() {
                return Err(PlanError::EmptyValues {
                    name: axis.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Register every declared axis.
    pub fn apply(&self, registry: &mut AxisRegistry) -> std::result::Result<(), RegistryError> {
        for axis in &self.axes {
            registry.register_literal(
                axis.name.clone(),
                axis.scope,
                axis.values.iter().cloned(),
            )?;
        }
        Ok(())
    }

    /// Declared axis names, in plan order.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|axis| axis.name.as_str()).collect()
    }
}
