//! # gmg-mesh: the staggered/collocated mesh hierarchy
//!
//! Builds, per rank, the `0..=vc_depth` sequence of [`Level`]s: local
//! extents, halo-inclusive coordinate and metric arrays for both the
//! staggered and collocated node families, and the four field buffers
//! (`phi`, `rhs`, `residual`, `correction`) each level owns.

pub mod hierarchy;
pub mod level;
pub mod stretch;

pub use hierarchy::{build_hierarchy, build_hierarchy_for};
pub use level::Level;
