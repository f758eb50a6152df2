pub mod error;
pub mod matrix;
pub mod model;
pub mod registry;

pub use error::{CoreError, Result};
pub use matrix::builder::{build, BuildMode, MatrixError, MatrixResult};
pub use matrix::diagnostics::{AxisDiagnostic, BuildModeKind, BuildOutcome, MatrixDiagnostic};
pub use model::axis::{Axis, AxisValue, Scope, SourceKind, ValueSource};
pub use model::tuple::ParamTuple;
pub use registry::scope::ScopeContext;
pub use registry::store::{AxisRegistry, RegistryError, ResolvedAxisDetail};
