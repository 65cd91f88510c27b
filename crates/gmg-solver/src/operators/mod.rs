//! The four stencil operators the V-cycle composes: smoother, residual,
//! restriction, prolongation.

pub mod prolongation;
pub mod residual;
pub mod restriction;
pub mod smoother;

pub use prolongation::prolong;
pub use residual::{global_residual_norm, local_inf_norm, residual};
pub use restriction::restrict;
pub use smoother::{smooth_colour, Colour};
