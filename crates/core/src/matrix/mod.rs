//! Matrix construction from resolved axes.
//!
//! This module combines registered axes into the ordered sequence of
//! parameter tuples a hosting runner binds to test invocations, either as a
//! full Cartesian product or as a hand-curated explicit list.
//!
//! # Example
//!
//! ```ignore
//! use paramgrid_core::matrix::builder::{build, BuildMode};
//!
//! let result = build(&["dataset", "loc_id"], &registry, &mut context, BuildMode::CrossProduct)?;
//! assert_eq!(result.tuples.len(), 4);
//! ```
pub mod builder;
pub mod diagnostics;

/// Matrix submodule identifier.
pub fn module_name() -> &'static str {
    "matrix"
}
