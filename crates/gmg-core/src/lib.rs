//! # gmg-core: shared types for the geometric multigrid Poisson engine
//!
//! Holds the pieces every other `gmg-*` crate depends on: the unified error
//! type, the configuration object the engine consumes, the floating-point
//! precision alias, and the small geometry enums (`Direction`, `Face`,
//! `StretchMode`, `Dimensionality`) used to pick a stencil's active
//! directions and stretch law at runtime rather than duplicating code per
//! direction or behind a compile-time dimensionality switch.
//!
//! This crate has no MPI dependency and no numerics of its own — it is pure
//! data definitions shared by the rest of the engine, with no solving logic
//! of its own.

pub mod config;
pub mod error;
pub mod geometry;
pub mod precision;

pub use config::{AxisConfig, Config};
pub use error::{MgError, MgResult};
pub use geometry::{Dimensionality, Direction, Face, StretchMode};
pub use precision::{Real, SINGLE_PRECISION};

/// Uniform halo pad width in every direction. A single ghost layer is
/// sufficient for the 7-point stencil the multigrid operators use; there
/// is no configuration knob for it.
pub const HALO_PAD: usize = 1;
