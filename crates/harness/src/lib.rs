pub mod errors;
pub mod plan;
pub mod runner;
pub mod sources;
pub mod trace;

pub use plan::*;
pub use runner::*;
pub use sources::*;
pub use trace::*;

pub fn harness_name() -> &'static str {
    "paramgrid-harness"
}
