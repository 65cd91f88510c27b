//! Red-black Gauss-Seidel smoother.
//!
//! The stretched-grid stencil is built in uniform computational space and
//! rescaled by the level's `eta1`/`eta2` metrics:
//!
//! ```text
//! L phi = sum_d [ eta1_d^2 * (phi+ - 2*phi0 + phi-) / dxi_d^2
//!                 + eta2_d * (phi+ - phi-) / (2*dxi_d) ]
//! ```
//!
//! using the collocated metric family, since `phi` lives on collocated
//! nodes. A colour pass updates `phi0` by isolating the diagonal term and
//! solving `L phi = F` for it, holding every neighbour fixed at its current
//! value (standard Gauss-Seidel).
//!
//! Colouring is `(i + j + k) % 2` on the halo-inclusive absolute index.
//! This coincides with the *global* parity because every rank's local
//! extent at every level is even (a power of two no smaller than `2 *
//! HALO_PAD`, per `gmg-topology`'s contract) — a rank's offset into the
//! global index space is always an even multiple of that extent, so local
//! and global parity agree and no rank-dependent colour assignment is
//! needed.

use gmg_core::{Dimensionality, Real};
use gmg_mesh::Level;

/// Red cells: `(i + j + k)` even. Black cells: odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Black,
}

impl Colour {
    #[inline]
    fn matches(self, parity: usize) -> bool {
        match self {
            Colour::Red => parity % 2 == 0,
            Colour::Black => parity % 2 == 1,
        }
    }
}

/// Applies one colour pass of the smoother to `level`, in place. Does not
/// touch the halo; the caller must re-sync it after each colour, since the
/// other colour's update depends on freshly exchanged neighbour values.
pub fn smooth_colour(level: &mut Level, dimensionality: Dimensionality, colour: Colour) {
    let (ix, iy, iz) = (
        level.interior_range(0),
        level.interior_range(1),
        level.interior_range(2),
    );
    // `dimensionality.active_directions()` names which axes this stencil
    // conceptually runs over, but an axis with no halo pad (a single global
    // node — planar mode's Y, or any axis exercising the ny=1
    // dimension-parity path while tagged `ThreeD`) has no `+1`/`-1`
    // neighbour to difference against and must be dropped regardless of the
    // dimensionality tag, or the index arithmetic below underflows.
    let dims: Vec<_> = dimensionality
        .active_directions()
        .iter()
        .copied()
        .filter(|dir| level.pad[dir.index()] > 0)
        .collect();

    // Precompute the diagonal coefficient and per-direction off-diagonal
    // factors once per direction index; these depend only on position
    // along that one axis, not on the other two, for a tensor-product
    // stretched grid.
    for k in iz.clone() {
        for j in iy.clone() {
            for i in ix.clone() {
                if !colour.matches(i + j + k) {
                    continue;
                }

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
                level.phi[[i, j, k]] = (f - offdiag) / diag;
            }
        }
    }
}

/// Both colour passes, without the intervening halo sync (used only where
/// a caller has already established a correct halo and does not need
/// colour-to-colour communication, e.g. single-rank tests).
#[cfg(test)]
pub fn smooth_sweep_no_sync(level: &mut Level, dimensionality: Dimensionality) {
    smooth_colour(level, dimensionality, Colour::Red);
    smooth_colour(level, dimensionality, Colour::Black);
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
    fn smoothing_a_zero_rhs_from_zero_leaves_phi_at_zero() {
        let config = small_config();
        let mut levels =
            build_hierarchy_for(&config, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        smooth_sweep_no_sync(level, Dimensionality::ThreeD);
        assert!(level.phi.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn smoothing_reduces_the_residual_for_a_nonzero_rhs() {
        use crate::operators::residual::{local_inf_norm, residual};

        let config = small_config();
        let mut levels =
            build_hierarchy_for(&config, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        level.rhs.fill(1.0);

        residual(level, Dimensionality::ThreeD);
        let before = local_inf_norm(&level.residual);

        for _ in 0..5 {
            smooth_sweep_no_sync(level, Dimensionality::ThreeD);
        }
        residual(level, Dimensionality::ThreeD);
        let after = local_inf_norm(&level.residual);

        assert!(after < before);
    }
}
