//! The floating-point type used throughout the multigrid engine.
//!
//! The engine is built generically against a single [`Real`] alias rather
//! than hard-coding `f64`, so that a single-precision build (the
//! `single-precision` feature) is a type-alias flip, not a parallel code
//! path. [`Config::validate`](crate::config::Config::validate) enforces the
//! tolerance floor that only applies when this alias is `f32`.

#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

#[cfg(feature = "single-precision")]
pub type Real = f32;

/// `true` when this build resolves [`Real`] to `f32`.
pub const SINGLE_PRECISION: bool = cfg!(feature = "single-precision");
