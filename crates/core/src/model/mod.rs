// Model types shared across the registry and builder.

pub mod axis;
pub mod tuple;

pub use axis::{Axis, AxisValue, Scope, SourceKind, ValueSource};
pub use tuple::ParamTuple;
