//! Full-weighting restriction, fine level to coarse level.
//!
//! For a coarse interior index `I` the corresponding fine index is `i =
//! 2*I` (in interior-relative terms). The coarse right-hand side is a
//! weighted sum of the fine residual at `(2I, 2J, 2K)` and its neighbours;
//! the weight depends only on how many of the active directions the
//! neighbour is offset in (0 = centre, 1 = face, 2 = edge, 3 = corner in
//! 3-D; 2-D drops the third tier). A neighbour whose fine index would land
//! outside the fine level's interior (a domain boundary, since restriction
//! never reads `R` at halo positions) is dropped and the remaining
//! weights renormalised to sum to one, the one-sided-weight rule a
//! boundary cell needs to keep the stencil's weights summing to one.
//!
//! Coarsening an odd fine extent absorbs the last fine cell into the last
//! coarse cell rather than duplicating it: the coarse index range is
//! `0..(fine_n + 1) / 2`, so a
//! trailing unmatched fine cell at an odd `fine_n` has no coarse partner
//! of its own and is only ever read as an *offset* neighbour of the last
//! coarse cell, never double-counted.

use gmg_core::{Dimensionality, Real};
use gmg_mesh::Level;

fn weight(active_dims: usize, nonzero_offsets: usize) -> Real {
    match (active_dims, nonzero_offsets) {
        (3, 0) => 1.0 / 8.0,
        (3, 1) => 1.0 / 16.0,
        (3, 2) => 1.0 / 32.0,
        (3, 3) => 1.0 / 64.0,
        (2, 0) => 1.0 / 4.0,
        (2, 1) => 1.0 / 8.0,
        (2, 2) => 1.0 / 16.0,
        _ => unreachable!("at most one offset per active direction, at most 3 active directions"),
    }
}

/// `coarse.rhs` <- full-weighted average of `fine.residual`, over the
/// coarse level's interior.
pub fn restrict(fine: &Level, coarse: &mut Level, dimensionality: Dimensionality) {
    let dims = dimensionality.active_directions();
    let active = dims.len();

    let coarse_ix = coarse.interior_range(0);
    let coarse_iy = coarse.interior_range(1);
    let coarse_iz = coarse.interior_range(2);
    let fine_interior = [
        fine.interior_range(0),
        fine.interior_range(1),
        fine.interior_range(2),
    ];
    let fine_pad = fine.pad;

    for kc in coarse_iz.clone() {
        for jc in coarse_iy.clone() {
            for ic in coarse_ix.clone() {
                let coarse_idx = [ic, jc, kc];
                // Interior-relative coarse index times two gives the
                // interior-relative fine index; re-add the fine pad to
                // land back in absolute buffer coordinates.
                let fine_centre: [usize; 3] = std::array::from_fn(|d| {
                    if dims.iter().any(|dir| dir.index() == d) {
                        2 * (coarse_idx[d] - coarse.pad[d]) + fine_pad[d]
                    } else {
                        fine_pad[d]
                    }
                });

                let mut weighted_sum: Real = 0.0;
                let mut weight_total: Real = 0.0;

                for combo in offset_combinations(active) {
                    let mut fine_idx = fine_centre;
                    let mut nonzero = 0usize;
                    let mut in_bounds = true;
                    for (slot, dir) in combo.iter().zip(dims.iter()) {
                        let d = dir.index();
                        if *slot != 0 {
                            nonzero += 1;
                        }
                        let candidate = fine_idx[d] as i64 + *slot as i64;
                        if candidate < fine_interior[d].start as i64
                            || candidate >= fine_interior[d].end as i64
                        {
                            in_bounds = false;
                            break;
                        }
                        fine_idx[d] = candidate as usize;
                    }
                    if !in_bounds {
                        continue;
                    }
                    let w = weight(active, nonzero);
                    weighted_sum += w * fine.residual[fine_idx];
                    weight_total += w;
                }

                coarse.rhs[[ic, jc, kc]] = weighted_sum / weight_total;
            }
        }
    }
}

/// Every combination of `{-1, 0, 1}` across `n` active directions.
fn offset_combinations(n: usize) -> Vec<Vec<i32>> {
    let mut combos = vec![vec![]];
    for _ in 0..n {
        let mut next = Vec::with_capacity(combos.len() * 3);
        for combo in &combos {
            for slot in [-1, 0, 1] {
                let mut extended = combo.clone();
                extended.push(slot);
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}
