//! The coarsest-level solve: weighted Jacobi iterated to convergence or a
//! hard iteration cap.
//!
//! Jacobi, not Gauss-Seidel, to avoid an extra halo sync per colour at the
//! level where the local sub-domain is smallest and synchronisation
//! overhead would dominate. The damping factor `omega = 0.8` and the
//! iteration cap `100` are chosen as conventional weighted-Jacobi defaults
//! that keep the scheme stable without over-damping convergence on a
//! well-conditioned coarsest grid.

use gmg_core::{Dimensionality, MgResult, Real};
use gmg_mesh::Level;
use gmg_topology::ProcessGrid;
use ndarray::Array3;

use crate::boundary::{apply_boundary_conditions, apply_z_boundary};
use crate::operators::residual::{global_residual_norm, residual};
use gmg_core::AxisConfig;

pub const JACOBI_OMEGA: Real = 0.8;
pub const JACOBI_MAX_ITERATIONS: usize = 100;

/// Runs weighted-Jacobi sweeps on `level` until the global residual
/// infinity norm is at most `tolerance` or [`JACOBI_MAX_ITERATIONS`] is
/// reached. Returns the number of iterations actually run.
#[allow(clippy::too_many_arguments)]
pub fn bottom_solve(
    level: &mut Level,
    dimensionality: Dimensionality,
    axes: [&AxisConfig; 2],
    z_axis: &AxisConfig,
    grid: &ProcessGrid,
    halo: &gmg_halo::HaloExchanger,
    tolerance: Real,
    scratch: &mut Array3<Real>,
) -> MgResult<usize> {
    let dims = dimensionality.active_directions();
    let world = grid.world();

    for iteration in 0..JACOBI_MAX_ITERATIONS {
        halo.sync(&mut level.phi, grid)?;
        apply_boundary_conditions(level, grid, axes);
        apply_z_boundary(level, z_axis);

        residual(level, dimensionality);
        let norm = global_residual_norm(level, world);
        if norm <= tolerance {
            return Ok(iteration);
        }

        jacobi_sweep(level, dims, scratch);
    }

    Ok(JACOBI_MAX_ITERATIONS)
}

fn jacobi_sweep(level: &mut Level, dims: &[gmg_core::Direction], scratch: &mut Array3<Real>) {
    let ix = level.interior_range(0);
    let iy = level.interior_range(1);
    let iz = level.interior_range(2);

    // See `smoother.rs::smooth_colour`'s comment: an axis with no halo pad
    // (a single global node) contributes nothing to the Laplacian and must
    // be dropped regardless of the dimensionality tag, or `minus[d] -= 1`
    // underflows.
    let dims: Vec<_> = dims.iter().copied().filter(|dir| level.pad[dir.index()] > 0).collect();

    scratch.assign(&level.phi);

    for k in iz {
        for j in iy.clone() {
            for i in ix.clone() {
                let mut diag: Real = 0.0;
                let mut offdiag: Real = 0.0;

                for dir in &dims {
                    let d = dir.index();
                    let idx = [i, j, k][d];
                    let eta1 = level.eta1_collocated[d][idx];
                    let eta2 = level.eta2_collocated[d][idx];
                    let dxi = level.dxi[d] as Real;

                    let mut plus = [i, j, k];
                    let mut minus = [i, j, k];
                    plus[d] += 1;
                    minus[d] -= 1;
                    let phi_plus = level.phi[plus];
                    let phi_minus = level.phi[minus];

                    let stretch2 = eta1 * eta1 / (dxi * dxi);
                    diag += -2.0 * stretch2;
                    offdiag += stretch2 * (phi_plus + phi_minus)
                        + eta2 / (2.0 * dxi) * (phi_plus - phi_minus);
                }

                let f = level.rhs[[i, j, k]];
                let gs_value = (f - offdiag) / diag;
                let old = level.phi[[i, j, k]];
                scratch[[i, j, k]] = (1.0 - JACOBI_OMEGA) * old + JACOBI_OMEGA * gs_value;
            }
        }
    }

    std::mem::swap(&mut level.phi, scratch);
}
