use std::path::PathBuf;

use paramgrid_core::{MatrixError, RegistryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read axis plan from '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse axis plan: {message}")]
    Parse { message: String },
    #[error("axis plan declares no axes")]
    NoAxes,
    #[error("axis plan entry {index} has an empty name")]
    EmptyName { index: usize },
    #[error("axis plan declares axis '{name}' more than once")]
    DuplicateName { name: String },
    #[error("axis plan entry '{name}' has an empty value list")]
    EmptyValues { name: String },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("matrix construction failed")]
    Build(#[from] MatrixError),
    #[error("axis registration failed")]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Trace(#[from] TraceError),
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to lock trace events mutex: {message}")]
    LockPoisoned { message: String },
}
