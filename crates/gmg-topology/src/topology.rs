//! The 2-D Cartesian process grid.
//!
//! Split, deliberately, into pure index arithmetic (this module's free
//! functions — trivially unit-testable without an MPI runtime) and the
//! thin [`ProcessGrid`] wrapper that holds the actual `mpi` communicator.
//! Coarse levels reuse the same process layout; only the *local extent*
//! shrinks per level, computed here with the same halving the mesh
//! hierarchy uses for coordinates.

use gmg_core::{Face, MgError, MgResult};
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

/// `(px, py)` for a rank in a `np_x * np_y` row-major layout: `rank = py *
/// np_x + px`. Row-major (X varies fastest) matches how the finest-level
/// global array is laid out in memory.
#[inline]
pub fn rank_to_coords(rank: i32, np_x: usize) -> (usize, usize) {
    let r = rank as usize;
    (r % np_x, r / np_x)
}

#[inline]
pub fn coords_to_rank(px: usize, py: usize, np_x: usize) -> i32 {
    (py * np_x + px) as i32
}

/// The process-grid coordinate of the neighbour across `face`, or `None`
/// when that face is a physical (non-periodic) boundary.
pub fn neighbor_coords(
    px: usize,
    py: usize,
    np_x: usize,
    np_y: usize,
    face: Face,
    periodic_x: bool,
    periodic_y: bool,
) -> Option<(usize, usize)> {
    match face {
        Face::XMinus => {
            if px > 0 {
                Some((px - 1, py))
            } else if periodic_x {
                Some((np_x - 1, py))
            } else {
                None
            }
        }
        Face::XPlus => {
            if px + 1 < np_x {
                Some((px + 1, py))
            } else if periodic_x {
                Some((0, py))
            } else {
                None
            }
        }
        Face::YMinus => {
            if py > 0 {
                Some((px, py - 1))
            } else if periodic_y {
                Some((px, np_y - 1))
            } else {
                None
            }
        }
        Face::YPlus => {
            if py + 1 < np_y {
                Some((px, py + 1))
            } else if periodic_y {
                Some((px, 0))
            } else {
                None
            }
        }
    }
}

/// The per-rank local extent along one axis at multigrid level `level`,
/// given the axis's global node count and the process count decomposing
/// it. `np == 1` (e.g. Z, which is never decomposed) always divides
/// evenly. Assumes powers of two throughout, per the configuration
/// layer's contract.
pub fn local_extent(global_extent: usize, np: usize, level: usize) -> MgResult<usize> {
    if np == 0 {
        return Err(MgError::Config("process count must be positive".into()));
    }
    if global_extent % np != 0 {
        return Err(MgError::Config(format!(
            "global extent {global_extent} is not evenly divisible by {np} processes"
        )));
    }
    let finest_local = global_extent / np;
    let local = finest_local >> level;
    if local == 0 {
        return Err(MgError::Config(format!(
            "level {level} leaves a zero-size local extent (finest local extent {finest_local})"
        )));
    }
    Ok(local)
}

/// [`local_extent`] plus the halo-fits-in-the-domain check: fails when a
/// level's local extent in a decomposed direction becomes smaller than
/// `2p`, since the halo could not be filled. Free function so the mesh
/// hierarchy can validate level extents without an MPI communicator.
pub fn local_extent_checked(
    global_extent: usize,
    np: usize,
    level: usize,
    halo_pad: usize,
    decomposed: bool,
) -> MgResult<usize> {
    let extent = local_extent(global_extent, np, level)?;
    if decomposed && np > 1 && extent < 2 * halo_pad {
        return Err(MgError::Config(format!(
            "level {level} local extent {extent} is smaller than 2p ({}); halo cannot be filled",
            2 * halo_pad
        )));
    }
    Ok(extent)
}

/// Owns the rank's position in, and communication handle for, the 2-D
/// Cartesian process grid. Reused unchanged across every multigrid level —
/// only [`local_extent`] varies per level.
pub struct ProcessGrid {
    world: SimpleCommunicator,
    np_x: usize,
    np_y: usize,
    px: usize,
    py: usize,
    periodic_x: bool,
    periodic_y: bool,
}

impl ProcessGrid {
    /// Builds the process grid for this rank. Fails with `MgError::Config`
    /// if `np_x * np_y` does not match the MPI world size.
    pub fn new(
        world: SimpleCommunicator,
        np_x: usize,
        np_y: usize,
        periodic_x: bool,
        periodic_y: bool,
    ) -> MgResult<Self> {
        let world_size = world.size() as usize;
        if np_x * np_y != world_size {
            return Err(MgError::Config(format!(
                "npX * npY ({np_x} * {np_y} = {}) must equal the MPI world size ({world_size})",
                np_x * np_y
            )));
        }
        let (px, py) = rank_to_coords(world.rank(), np_x);
        tracing::debug!(rank = world.rank(), px, py, np_x, np_y, "process grid assembled");
        Ok(Self {
            world,
            np_x,
            np_y,
            px,
            py,
            periodic_x,
            periodic_y,
        })
    }

    #[inline]
    pub fn world(&self) -> &SimpleCommunicator {
        &self.world
    }

    #[inline]
    pub fn rank(&self) -> i32 {
        self.world.rank()
    }

    #[inline]
    pub fn coords(&self) -> (usize, usize) {
        (self.px, self.py)
    }

    #[inline]
    pub fn process_counts(&self) -> (usize, usize) {
        (self.np_x, self.np_y)
    }

    /// The neighbour rank across `face`, or `None` when that face has no
    /// neighbour and must instead fall back to a physical boundary
    /// condition.
    pub fn neighbor(&self, face: Face) -> Option<i32> {
        neighbor_coords(
            self.px,
            self.py,
            self.np_x,
            self.np_y,
            face,
            self.periodic_x,
            self.periodic_y,
        )
        .map(|(nx, ny)| coords_to_rank(nx, ny, self.np_x))
    }

    /// This rank's local extent along `direction` at `level`, validated
    /// against the halo pad width `halo_pad` for directions that are
    /// actually decomposed (X, Y). Z is passed `np = 1` by the caller and
    /// is never subject to the `>= 2 * halo_pad` rule.
    pub fn local_extent_checked(
        &self,
        global_extent: usize,
        np: usize,
        level: usize,
        halo_pad: usize,
        decomposed: bool,
    ) -> MgResult<usize> {
        local_extent_checked(global_extent, np, level, halo_pad, decomposed)
    }
}
