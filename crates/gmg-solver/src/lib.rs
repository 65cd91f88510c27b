//! # gmg-solver: the multigrid V-cycle engine
//!
//! Composes `gmg-mesh`'s level hierarchy, `gmg-halo`'s exchange, and the
//! boundary-condition and stencil operators below into the single public
//! entry point this crate exposes: [`MgSolver::mg_solve`].

pub mod boundary;
pub mod bottom_solve;
pub mod operators;
pub mod vcycle;

pub use vcycle::{MgSolver, SolveOutcome};
