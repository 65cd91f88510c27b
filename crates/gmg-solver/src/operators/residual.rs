//! Residual computation and the infinity-norm convergence test.

use gmg_core::{Dimensionality, Real};
use gmg_mesh::Level;
use mpi::collective::SystemOperation;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

/// `R = F - L phi` at every interior cell, using the same stencil the
/// smoother uses. Assumes the halo is already current; does not sync it
/// afterwards, since `R` is read only for the norm reduction, never at halo
/// positions.
pub fn residual(level: &mut Level, dimensionality: Dimensionality) {
    let (ix, iy, iz) = (
        level.interior_range(0),
        level.interior_range(1),
        level.interior_range(2),
    );
    // See `smoother.rs::smooth_colour`'s comment: an axis with no halo pad
    // (a single global node) contributes nothing to the Laplacian and must
    // be dropped regardless of the dimensionality tag, or `minus[d] -= 1`
    // underflows.
    let dims: Vec<_> = dimensionality
        .active_directions()
        .iter()
        .copied()
        .filter(|dir| level.pad[dir.index()] > 0)
        .collect();

    for k in iz.clone() {
        for j in iy.clone() {
            for i in ix.clone() {
                let mut l_phi: Real = 0.0;
                let phi0 = level.phi[[i, j, k]];

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

                    l_phi += eta1 * eta1 / (dxi * dxi) * (phi_plus - 2.0 * phi0 + phi_minus)
                        + eta2 / (2.0 * dxi) * (phi_plus - phi_minus);
                }

                level.residual[[i, j, k]] = level.rhs[[i, j, k]] - l_phi;
            }
        }
    }
}

/// The local (this rank only) infinity norm of `field` over every element
/// in the array — including halo cells, which are always zero or a stale
/// copy of a neighbour's interior and hence never larger in magnitude than
/// the true interior maximum for a converged field; callers that must
/// exclude halo cells should slice to `level.interior_range` first.
pub fn local_inf_norm(field: &ndarray::Array3<Real>) -> Real {
    field.iter().fold(0.0, |acc, &v| acc.max(v.abs()))
}

/// The global infinity norm of the fine-level residual: a local reduction
/// followed by `MPI_Allreduce(MAX)`.
pub fn global_residual_norm(level: &Level, world: &SimpleCommunicator) -> Real {
    let interior = level
        .residual
        .slice(ndarray::s![
            level.interior_range(0),
            level.interior_range(1),
            level.interior_range(2)
        ]);
    let local_max = interior.iter().fold(0.0, |acc: Real, &v| acc.max(v.abs()));

    let mut global_max: Real = 0.0;
    world.all_reduce_into(&local_max, &mut global_max, SystemOperation::max());
    global_max
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmg_core::{AxisConfig, Config};
    use gmg_mesh::build_hierarchy_for;

    fn uniform_axis(log2_extent: u32) -> AxisConfig {
        AxisConfig {
            log2_extent,
            grid_mode: 0,
            beta: 0.0,
            periodic: true,
        }
    }

    fn small_config() -> Config {
        Config {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
            x: uniform_axis(4),
            y: uniform_axis(4),
            z: uniform_axis(4),
            np_x: 1,
            np_y: 1,
            vc_depth: 1,
            vc_count: 10,
            pre_smooth: 2,
            post_smooth: 2,
            inter_smooth: vec![0, 0],
            tolerance: 1e-6,
        }
    }

    #[test]
    fn zero_field_against_zero_rhs_has_zero_residual() {
        let config = small_config();
        let mut levels =
            build_hierarchy_for(&config, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        residual(level, Dimensionality::ThreeD);
        assert_eq!(local_inf_norm(&level.residual), 0.0);
    }

    #[test]
    fn nonzero_rhs_with_zero_phi_reproduces_the_rhs_as_residual() {
        let config = small_config();
        let mut levels =
            build_hierarchy_for(&config, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        level.rhs.fill(2.0);
        residual(level, Dimensionality::ThreeD);
        let ix = level.interior_range(0);
        let iy = level.interior_range(1);
        let iz = level.interior_range(2);
        for k in iz {
            for j in iy.clone() {
                for i in ix.clone() {
                    assert!((level.residual[[i, j, k]] - 2.0).abs() < 1e-9);
                }
            }
        }
    }
}
