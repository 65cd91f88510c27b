//! Analytic tangent-hyperbolic grid-stretch laws.
//!
//! Each law maps a uniform computational coordinate `xi in [0, 1]` to a
//! physical coordinate `x in [0, length]`. The multigrid stencil needs the
//! *inverse* mapping's derivatives — `eta1 = dxi/dx` and `eta2 = d2xi/dx2`
//! — since the discrete Laplacian is built in uniform `xi`-space and
//! scaled back to physical units by these factors. They are obtained
//! analytically from `dx/dxi` and `d2x/dxi2` by the standard
//! inverse-function-derivative identities:
//!
//! ```text
//! eta1 = 1 / (dx/dxi)
//! eta2 = -(d2x/dxi2) / (dx/dxi)^3
//! ```
//!
//! `eta1`/`eta2` are the grid metrics the stencil actually multiplies a
//! computational-space finite difference by, not the raw `dx/dxi` and
//! `d2x/dxi2` derivatives a first reading of "first and second derivative
//! of the mapping" might suggest.

use gmg_core::{Real, StretchMode};

/// `(x, eta1, eta2)` at computational coordinate `xi in [0, 1]`, for a
/// domain of physical length `length` and stretch parameter `beta`.
/// `beta` is ignored for [`StretchMode::Uniform`].
pub fn map(mode: StretchMode, xi: f64, length: f64, beta: f64) -> (Real, Real, Real) {
    match mode {
        StretchMode::Uniform => {
            let x = length * xi;
            (x as Real, (1.0 / length) as Real, 0.0)
        }
        StretchMode::SingleTanh => single_tanh(xi, length, beta),
        StretchMode::DoubleTanh => double_tanh(xi, length, beta),
    }
}

/// Clusters nodes near `xi = 0` (e.g. a single wall at `x = 0`).
fn single_tanh(xi: f64, length: f64, beta: f64) -> (Real, Real, Real) {
    let tanh_beta = beta.tanh();
    let u = beta * (1.0 - xi);
    let sech2 = 1.0 / u.cosh().powi(2);
    let tanh_u = u.tanh();

    let x = length * (1.0 - tanh_u / tanh_beta);
    let dx_dxi = length * beta * sech2 / tanh_beta;
    let d2x_dxi2 = 2.0 * length * beta * beta * sech2 * tanh_u / tanh_beta;

    let eta1 = 1.0 / dx_dxi;
    let eta2 = -d2x_dxi2 / dx_dxi.powi(3);
    (x as Real, eta1 as Real, eta2 as Real)
}

/// Clusters nodes near both `xi = 0` and `xi = 1` (e.g. two opposing
/// walls).
fn double_tanh(xi: f64, length: f64, beta: f64) -> (Real, Real, Real) {
    let half_beta = 0.5 * beta;
    let tanh_half_beta = half_beta.tanh();
    let u = half_beta * (2.0 * xi - 1.0);
    let sech2 = 1.0 / u.cosh().powi(2);
    let tanh_u = u.tanh();

    let x = 0.5 * length * (1.0 + tanh_u / tanh_half_beta);
    let dx_dxi = 0.5 * length * beta * sech2 / tanh_half_beta;
    let d2x_dxi2 = -length * beta * beta * sech2 * tanh_u / tanh_half_beta;

    let eta1 = 1.0 / dx_dxi;
    let eta2 = -d2x_dxi2 / dx_dxi.powi(3);
    (x as Real, eta1 as Real, eta2 as Real)
}
