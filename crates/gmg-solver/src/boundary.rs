//! Dirichlet-zero and periodic boundary conditions.
//!
//! X and Y get theirs from [`apply_boundary_conditions`]: a periodic face is
//! already correct after the halo exchange (the wrap-around neighbour rank
//! filled it), so this only has work to do on a face with no neighbour and
//! no periodicity, where it zeroes the halo layer. Z has no [`Face`] — it is
//! never decomposed across ranks, so [`HaloExchanger`](gmg_halo::HaloExchanger)
//! never touches it and both of its ends are handled by
//! [`apply_z_boundary`] instead, entirely within one rank's own buffer.

use gmg_core::{AxisConfig, Face};
use gmg_mesh::Level;
use gmg_topology::ProcessGrid;

/// Applies Dirichlet-zero to every physical (non-periodic, no-neighbour)
/// face of `level`'s `phi`. `axes` is `[x, y]`, used only to read each
/// direction's periodicity flag (the process grid already knows whether a
/// neighbour exists).
pub fn apply_boundary_conditions(level: &mut Level, grid: &ProcessGrid, axes: [&AxisConfig; 2]) {
    for face in Face::ALL {
        let d = face.direction().index();
        let periodic = axes[d].periodic;
        if periodic || grid.neighbor(face).is_some() {
            continue;
        }
        zero_halo_layer(level, face);
    }
}

/// Z is never decomposed (no [`Face`], no rank-to-rank neighbour in this
/// direction, so [`HaloExchanger`](gmg_halo::HaloExchanger) never touches
/// it), which means both of its faces are always "physical" in the sense
/// `apply_boundary_conditions` uses for X/Y. A periodic Z domain wraps
/// entirely within a single rank's own buffer — the far interior layer is
/// copied straight into the near halo and vice versa, no MPI involved — so
/// it gets its own function rather than a [`Face`] variant.
pub fn apply_z_boundary(level: &mut Level, z_axis: &AxisConfig) {
    let p = level.pad[2];
    if p == 0 {
        return;
    }
    if z_axis.periodic {
        wrap_z_periodic(level, p);
    } else {
        zero_z_halo(level, p);
    }
}

fn wrap_z_periodic(level: &mut Level, p: usize) {
    let nz = level.nz;
    for k in 0..p {
        for j in 0..level.phi.dim().1 {
            for i in 0..level.phi.dim().0 {
                level.phi[[i, j, k]] = level.phi[[i, j, nz + k]];
                level.phi[[i, j, nz + p + k]] = level.phi[[i, j, p + k]];
            }
        }
    }
}

fn zero_z_halo(level: &mut Level, p: usize) {
    let nz = level.nz;
    let (dim0, dim1, _) = level.phi.dim();
    level
        .phi
        .slice_mut(ndarray::s![0..dim0, 0..dim1, 0..p])
        .fill(0.0);
    level
        .phi
        .slice_mut(ndarray::s![0..dim0, 0..dim1, nz + p..nz + 2 * p])
        .fill(0.0);
}

fn zero_halo_layer(level: &mut Level, face: Face) {
    let d = face.direction().index();
    let p = level.pad[d];
    if p == 0 {
        // Planar mode's inert Y direction: no halo to zero.
        return;
    }
    let n = [level.nx, level.ny, level.nz][d];
    let halo_range = if face.is_low() { 0..p } else { n + p..n + 2 * p };

    let mut ranges = [
        0..level.phi.dim().0,
        0..level.phi.dim().1,
        0..level.phi.dim().2,
    ];
    ranges[d] = halo_range;

    let mut slab = level
        .phi
        .slice_mut(ndarray::s![ranges[0].clone(), ranges[1].clone(), ranges[2].clone()]);
    slab.fill(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmg_core::{AxisConfig, Config, Dimensionality};
    use gmg_mesh::build_hierarchy_for;

    fn axis(periodic: bool) -> AxisConfig {
        AxisConfig {
            log2_extent: 4,
            grid_mode: 0,
            beta: 0.0,
            periodic,
        }
    }

    #[test]
    fn zero_halo_layer_only_touches_the_named_face() {
        let cfg = Config {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
            x: axis(false),
            y: axis(false),
            z: axis(false),
            np_x: 1,
            np_y: 1,
            vc_depth: 1,
            vc_count: 5,
            pre_smooth: 1,
            post_smooth: 1,
            inter_smooth: vec![0, 0],
            tolerance: 1e-6,
        };
        let mut levels =
            build_hierarchy_for(&cfg, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        level.phi.fill(9.0);
        zero_halo_layer(level, Face::XMinus);
        assert_eq!(level.phi[[0, 5, 5]], 0.0);
        assert_eq!(level.phi[[1, 5, 5]], 9.0);
    }

    fn small_config(z: AxisConfig) -> Config {
        Config {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
            x: axis(true),
            y: axis(true),
            z,
            np_x: 1,
            np_y: 1,
            vc_depth: 1,
            vc_count: 5,
            pre_smooth: 1,
            post_smooth: 1,
            inter_smooth: vec![0, 0],
            tolerance: 1e-6,
        }
    }

    #[test]
    fn z_dirichlet_zeroes_both_z_halo_layers() {
        let cfg = small_config(axis(false));
        let mut levels =
            build_hierarchy_for(&cfg, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        level.phi.fill(9.0);
        apply_z_boundary(level, &cfg.z);
        assert_eq!(level.phi[[5, 5, 0]], 0.0);
        assert_eq!(level.phi[[5, 5, level.nz + level.pad[2]]], 0.0);
        assert_eq!(level.phi[[5, 5, 1]], 9.0);
    }

    #[test]
    fn z_periodic_wraps_the_opposite_interior_layer_in() {
        let cfg = small_config(axis(true));
        let mut levels =
            build_hierarchy_for(&cfg, (0, 0), (1, 1), Dimensionality::ThreeD).unwrap();
        let level = &mut levels[0];
        let p = level.pad[2];
        let nz = level.nz;
        level.phi.fill(0.0);
        level.phi[[5, 5, p]] = 1.0; // first interior z-layer
        level.phi[[5, 5, nz + p - 1]] = 2.0; // last interior z-layer
        apply_z_boundary(level, &cfg.z);
        assert_eq!(level.phi[[5, 5, nz + p]], 1.0); // high halo <- first interior
        assert_eq!(level.phi[[5, 5, p - 1]], 2.0); // low halo <- last interior
    }
}
