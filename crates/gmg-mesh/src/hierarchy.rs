//! Builds the per-rank mesh hierarchy from a [`Config`] and the rank's
//! position in the process grid.
//!
//! Coarsening is stride-2^level sub-sampling of the finest level's node
//! positions and metrics, not re-derivation at the coarser grid's own
//! spacing — consistency between levels depends on every level seeing
//! numbers taken from the same finest-level mapping. This module gets the
//! identical numbers by evaluating the same closed-form [`stretch::map`]
//! directly at each level's own computational-space node positions instead
//! of literally indexing into the finest array: since `xi_level(i) = i /
//! N_level = (i * 2^level) / N_0 = xi_finest(i * 2^level)`, evaluating the
//! analytic map at `xi_level(i)` and looking up the finest array at index
//! `i * 2^level` give the same real number fed through the same formula,
//! hence the same floating-point result. This is plain re-evaluation, not
//! re-fitting: the same `beta` and the same law are used at every level.

use gmg_core::{Config, Dimensionality, Real, HALO_PAD};
use gmg_topology::{local_extent_checked, ProcessGrid};
use ndarray::Array3;

use crate::level::Level;
use crate::stretch;

/// Builds the full `0..=vc_depth` level hierarchy for this rank, given its
/// process-grid position. Pure index/math — no MPI communicator touched —
/// so it is unit-testable without a live MPI runtime; [`build_hierarchy`]
/// is the thin wrapper an MPI-initialized caller actually uses.
pub fn build_hierarchy_for(
    config: &Config,
    rank_coord_xy: (usize, usize),
    process_counts_xy: (usize, usize),
    dimensionality: Dimensionality,
) -> gmg_core::MgResult<Vec<Level>> {
    let (px, py) = rank_coord_xy;
    let (np_x, np_y) = process_counts_xy;

    let axes = [&config.x, &config.y, &config.z];
    let lengths = [config.lx, config.ly, config.lz];
    let global_extents = [
        config.x.global_extent(),
        config.y.global_extent(),
        config.z.global_extent(),
    ];
    // Z is never decomposed; Y is inert (a single node) in planar mode.
    let np = [np_x, np_y, 1usize];
    let rank_coord = [px, py, 0usize];
    let decomposed = [true, matches!(dimensionality, Dimensionality::ThreeD), false];

    let mut levels = Vec::with_capacity(config.vc_depth + 1);

    for level in 0..=config.vc_depth {
        let mut local = [1usize; 3];
        let mut pad = [0usize; 3];
        let mut dxi = [0.0f64; 3];
        let mut coords_staggered: [Vec<Real>; 3] = [vec![], vec![], vec![]];
        let mut coords_collocated: [Vec<Real>; 3] = [vec![], vec![], vec![]];
        let mut eta1_staggered: [Vec<Real>; 3] = [vec![], vec![], vec![]];
        let mut eta2_staggered: [Vec<Real>; 3] = [vec![], vec![], vec![]];
        let mut eta1_collocated: [Vec<Real>; 3] = [vec![], vec![], vec![]];
        let mut eta2_collocated: [Vec<Real>; 3] = [vec![], vec![], vec![]];

        for d in 0..3 {
            // A direction with a single global node (yInd = 0 for planar
            // runs, or a 3-D run exercising the ny=1 dimension-parity path)
            // is inert regardless of which stencil path `dimensionality`
            // selects: it has nothing to coarsen, so it must never be run
            // through `local_extent_checked`, which would otherwise shrink
            // it to zero above level 0.
            if global_extents[d] == 1 {
                local[d] = 1;
                pad[d] = 0;
                dxi[d] = 1.0;
                coords_staggered[d] = vec![0.0 as Real];
                coords_collocated[d] = vec![0.0 as Real];
                eta1_staggered[d] = vec![0.0 as Real];
                eta2_staggered[d] = vec![0.0 as Real];
                eta1_collocated[d] = vec![0.0 as Real];
                eta2_collocated[d] = vec![0.0 as Real];
                continue;
            }

            let n_level =
                local_extent_checked(global_extents[d], np[d], level, HALO_PAD, decomposed[d])?;
            local[d] = n_level;
            pad[d] = HALO_PAD;

            // Global node count at this level, and this rank's offset into
            // it: the process layout is unchanged across levels, so the
            // rank still owns the same fraction of the (coarsened) global
            // index space.
            let global_level = global_extents[d] >> level;
            let offset = rank_coord[d] * n_level;
            dxi[d] = 1.0 / global_level as f64;

            let mode = axes[d].stretch_mode()?;
            let beta = axes[d].beta;
            let length = lengths[d];

            let mut stag = Vec::with_capacity(n_level + 2 * HALO_PAD);
            let mut coll = Vec::with_capacity(n_level + 2 * HALO_PAD);
            let mut e1s = Vec::with_capacity(n_level + 2 * HALO_PAD);
            let mut e2s = Vec::with_capacity(n_level + 2 * HALO_PAD);
            let mut e1c = Vec::with_capacity(n_level + 2 * HALO_PAD);
            let mut e2c = Vec::with_capacity(n_level + 2 * HALO_PAD);

            for local_i in 0..n_level + 2 * HALO_PAD {
                // local_i runs over the halo-inclusive range; global_i is
                // the corresponding global node index at this level,
                // allowed to run negative/beyond at the domain edges (the
                // BC component overwrites those halo cells later; periodic
                // faces get their value from the wrap-around neighbour
                // rank instead of from this formula).
                let global_i = offset as i64 + local_i as i64 - HALO_PAD as i64;
                let xi_stag = global_i as f64 * dxi[d];
                let xi_coll = (global_i as f64 + 0.5) * dxi[d];

                let (x, e1, e2) = stretch::map(mode, xi_stag, length, beta);
                stag.push(x);
                e1s.push(e1);
                e2s.push(e2);

                let (x, e1, e2) = stretch::map(mode, xi_coll, length, beta);
                coll.push(x);
                e1c.push(e1);
                e2c.push(e2);
            }

            coords_staggered[d] = stag;
            coords_collocated[d] = coll;
            eta1_staggered[d] = e1s;
            eta2_staggered[d] = e2s;
            eta1_collocated[d] = e1c;
            eta2_collocated[d] = e2c;
        }

        let shape = (
            local[0] + 2 * pad[0],
            local[1] + 2 * pad[1],
            local[2] + 2 * pad[2],
        );

        levels.push(Level {
            nx: local[0],
            ny: local[1],
            nz: local[2],
            pad,
            coords_staggered,
            coords_collocated,
            eta1_staggered,
            eta2_staggered,
            eta1_collocated,
            eta2_collocated,
            dxi,
            phi: Array3::zeros(shape),
            rhs: Array3::zeros(shape),
            residual: Array3::zeros(shape),
            correction: Array3::zeros(shape),
        });
    }

    tracing::debug!(levels = levels.len(), "mesh hierarchy built");
    Ok(levels)
}

/// Builds the hierarchy for the rank owning `grid`, reading its position
/// and process counts straight from the communicator.
pub fn build_hierarchy(
    config: &Config,
    grid: &ProcessGrid,
    dimensionality: Dimensionality,
) -> gmg_core::MgResult<Vec<Level>> {
    build_hierarchy_for(config, grid.coords(), grid.process_counts(), dimensionality)
}
