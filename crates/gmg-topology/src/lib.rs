//! # gmg-topology: the 2-D Cartesian process grid
//!
//! Derives, for the current rank, its `(px, py)` coordinate, its four
//! cardinal neighbours (or `None` on a physical boundary), and the local
//! extent of every multigrid level. Z is never decomposed across ranks.

pub mod topology;

pub use topology::{
    coords_to_rank, local_extent, local_extent_checked, neighbor_coords, rank_to_coords,
    ProcessGrid,
};
