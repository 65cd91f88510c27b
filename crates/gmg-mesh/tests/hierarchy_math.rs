//! Mesh hierarchy construction swept across stretch laws and process
//! positions. Pure math — [`build_hierarchy_for`] takes rank coordinates
//! directly, so no MPI runtime is needed here.

use gmg_core::{AxisConfig, Config, Dimensionality};
use gmg_mesh::build_hierarchy_for;

fn axis(log2_extent: u32, grid_mode: u8, beta: f64) -> AxisConfig {
    AxisConfig {
        log2_extent,
        grid_mode,
        beta,
        periodic: grid_mode == 0,
    }
}

fn config(x: AxisConfig, y: AxisConfig, z: AxisConfig, vc_depth: usize) -> Config {
    Config {
        lx: 2.0,
        ly: 1.0,
        lz: 1.0,
        x,
        y,
        z,
        np_x: 2,
        np_y: 2,
        vc_depth,
        vc_count: 20,
        pre_smooth: 2,
        post_smooth: 2,
        inter_smooth: vec![0; vc_depth],
        tolerance: 1e-8,
    }
}

#[test]
fn every_rank_sees_a_contiguous_slab_of_the_global_domain() {
    let cfg = config(axis(6, 0, 0.0), axis(6, 0, 0.0), axis(6, 0, 0.0), 1);
    let mut slabs = Vec::new();
    for py in 0..2 {
        for px in 0..2 {
            let levels = build_hierarchy_for(&cfg, (px, py), (2, 2), Dimensionality::ThreeD)
                .expect("hierarchy should build");
            let level0 = &levels[0];
            let pad = level0.pad[0];
            let lo = level0.coords_staggered[0][pad];
            let hi = level0.coords_staggered[0][pad + level0.nx];
            slabs.push((px, lo, hi));
        }
    }
    // The two X-slabs (px=0 and px=1) must not overlap and must together
    // span [0, lx).
    let (_, lo0, hi0) = slabs.iter().find(|(px, ..)| *px == 0).unwrap();
    let (_, lo1, hi1) = slabs.iter().find(|(px, ..)| *px == 1).unwrap();
    assert!((*lo0 - 0.0).abs() < 1e-9);
    assert!((hi0 - lo1).abs() < 1e-9);
    assert!((*hi1 - 2.0).abs() < 1e-6);
}

#[test]
fn single_tanh_stretching_still_produces_a_halving_hierarchy() {
    let cfg = config(axis(6, 1, 2.0), axis(6, 0, 0.0), axis(6, 0, 0.0), 2);
    let levels = build_hierarchy_for(&cfg, (0, 0), (2, 2), Dimensionality::ThreeD)
        .expect("stretched hierarchy should build");
    assert_eq!(levels[0].nx, 32);
    assert_eq!(levels[1].nx, 16);
    assert_eq!(levels[2].nx, 8);
}

#[test]
fn rejects_a_level_that_would_leave_the_halo_unfillable() {
    // np_x = 4 on a 2^3 = 8-node axis leaves 2 local nodes at level 0, then
    // 1 at level 1 -- too small to hold a halo pad of 1 on each side.
    let mut cfg = config(axis(3, 0, 0.0), axis(3, 0, 0.0), axis(3, 0, 0.0), 1);
    cfg.np_x = 4;
    cfg.np_y = 1;
    let result = build_hierarchy_for(&cfg, (0, 0), (4, 1), Dimensionality::ThreeD);
    assert!(result.is_err());
}
