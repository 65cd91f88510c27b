//! Trilinear (3-D) / bilinear (2-D) prolongation, coarse level to fine
//! level.
//!
//! Interpolates the coarse level's `phi` (which, on the ascent, holds the
//! correction just produced by the bottom solve or a finer ascent step)
//! onto the fine level's node positions and *adds* the result into the
//! fine level's `correction` buffer — the V-cycle driver is the one that
//! then adds `correction` into `phi` as a separate, subsequent step.
//!
//! A fine cell at an even interior-relative index coincides with a coarse
//! node and receives its value exactly (the trilinear weight degenerates
//! to a single corner with weight 1). The same odd/even tie-breaking as
//! restriction applies when the fine extent is odd.

use gmg_core::{Dimensionality, Real};
use gmg_mesh::Level;

pub fn prolong(coarse: &Level, fine: &mut Level, dimensionality: Dimensionality) {
    let dims = dimensionality.active_directions();

    let fine_ix = fine.interior_range(0);
    let fine_iy = fine.interior_range(1);
    let fine_iz = fine.interior_range(2);
    let coarse_pad = coarse.pad;
    let coarse_n = [coarse.nx, coarse.ny, coarse.nz];
    let fine_pad = fine.pad;

    for kf in fine_iz.clone() {
        for jf in fine_iy.clone() {
            for if_ in fine_ix.clone() {
                let fine_idx = [if_, jf, kf];

                // Per active direction: the coarse node at or just below
                // this fine cell, and the interpolation fraction toward
                // the next coarse node (0.0 if the fine cell coincides
                // with a coarse node).
                let mut coarse_lo = [0usize; 3];
                let mut frac = [0.0 as Real; 3];
                for dir in dims {
                    let d = dir.index();
                    let fine_rel = fine_idx[d] - fine_pad[d];
                    let lo = (fine_rel / 2).min(coarse_n[d] - 1);
                    coarse_lo[d] = coarse_pad[d] + lo;
                    frac[d] = if fine_rel % 2 == 0 { 0.0 } else { 0.5 };
                }

                let mut value: Real = 0.0;
                for combo in corner_combinations(dims.len()) {
                    let mut idx = coarse_lo;
                    let mut weight: Real = 1.0;
                    for (slot, dir) in combo.iter().zip(dims.iter()) {
                        let d = dir.index();
                        if *slot == 1 {
                            let hi = (idx[d] + 1).min(coarse_pad[d] + coarse_n[d] - 1);
                            weight *= frac[d];
                            idx[d] = hi;
                        } else {
                            weight *= 1.0 - frac[d];
                        }
                    }
                    if weight != 0.0 {
                        value += weight * coarse.phi[idx];
                    }
                }

                fine.correction[fine_idx] += value;
            }
        }
    }
}

/// Every `{0, 1}` combination over `n` active directions (the corners of
/// the interpolation cell).
fn corner_combinations(n: usize) -> Vec<Vec<u8>> {
    let mut combos = vec![vec![]];
    for _ in 0..n {
        let mut next = Vec::with_capacity(combos.len() * 2);
        for combo in &combos {
            for slot in [0u8, 1u8] {
                let mut extended = combo.clone();
                extended.push(slot);
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}
