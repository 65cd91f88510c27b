//! Single-rank exercise of the real non-blocking exchange protocol: with
//! `np_x = np_y = 1` and both directions periodic, every face's neighbour
//! is this rank itself (see `gmg-topology`'s
//! `full_periodicity_gives_every_rank_four_neighbors` test), so `sync`
//! performs a genuine send/receive round trip rather than a no-op, and the
//! halo consistency property (spec §8, property 1) is checkable without a
//! multi-rank launch: the low-X halo must end up holding exactly what the
//! high-X interior slab held before the call, and vice versa, and the same
//! for Y.

use gmg_halo::HaloExchanger;
use gmg_topology::ProcessGrid;
use ndarray::Array3;

fn fill(shape: (usize, usize, usize)) -> Array3<f64> {
    let mut array = Array3::zeros(shape);
    for ((i, j, k), v) in array.indexed_iter_mut() {
        *v = 100.0 * i as f64 + 10.0 * j as f64 + k as f64;
    }
    array
}

#[test]
fn periodic_self_neighbor_wraps_x_and_y_halos() {
    let universe = mpi::initialize().expect("MPI should initialize as a singleton process");
    let grid = ProcessGrid::new(universe.world(), 1, 1, true, true).unwrap();

    // nx = ny = 4, nz = 2, pad = 1: full shape (6, 6, 4); interior indices
    // 1..5 along x and y.
    let shape = (6usize, 6, 4);
    let pad = [1usize, 1, 1];
    let mut array = fill(shape);
    let before = array.clone();

    let exchanger = HaloExchanger::new(&grid, shape, pad, false);
    exchanger.sync(&mut array, &grid).unwrap();

    for k in 0..4 {
        for j in 1..5 {
            // Low-X halo <- what the high-X interior cell (index 4) held.
            assert_eq!(array[[0, j, k]], before[[4, j, k]]);
            // High-X halo <- what the low-X interior cell (index 1) held.
            assert_eq!(array[[5, j, k]], before[[1, j, k]]);
        }
    }
    // Corners of the halo (e.g. [0, 0, k]) are written by both the X and Y
    // face unpacks and are not checked here — a four-face exchange has no
    // well-defined corner value, and the 5-/7-point stencils this crate's
    // operators use never read one.
    for k in 0..4 {
        for i in 1..5 {
            assert_eq!(array[[i, 0, k]], before[[i, 4, k]]);
            assert_eq!(array[[i, 5, k]], before[[i, 1, k]]);
        }
    }

    // Z is never touched by the exchange: an interior cell's value at
    // either end of the z extent is unchanged.
    assert_eq!(array[[2, 2, 0]], before[[2, 2, 0]]);
    assert_eq!(array[[2, 2, 3]], before[[2, 2, 3]]);
}
