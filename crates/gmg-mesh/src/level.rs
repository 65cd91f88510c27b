//! One entry in the mesh hierarchy.

use gmg_core::Real;
use ndarray::Array3;

/// Per-direction 1-D node arrays and the level's four field buffers.
///
/// `pad[d]` is the halo width in direction `d`; it is `0` for a direction
/// that this run does not decompose or does not use at all (Y in planar
/// mode). Field buffers are always shaped `(nx + 2*pad[0], ny + 2*pad[1],
/// nz + 2*pad[2])`; indices `0..pad[d]` and `n+pad[d]..n+2*pad[d]` along
/// that axis are halo cells, per the Data Model's indexing convention.
pub struct Level {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub pad: [usize; 3],

    /// Node positions in physical space, one array per direction, indexed
    /// over this level's local (halo-inclusive) node range.
    pub coords_staggered: [Vec<Real>; 3],
    pub coords_collocated: [Vec<Real>; 3],

    /// `eta1 = dxi/dx`, `eta2 = d2xi/dx2` (see `stretch.rs` docs), one
    /// array per direction, same length as the coordinate arrays.
    pub eta1_staggered: [Vec<Real>; 3],
    pub eta2_staggered: [Vec<Real>; 3],
    pub eta1_collocated: [Vec<Real>; 3],
    pub eta2_collocated: [Vec<Real>; 3],

    /// Uniform computational spacing at this level, per direction.
    pub dxi: [f64; 3],

    pub phi: Array3<Real>,
    pub rhs: Array3<Real>,
    pub residual: Array3<Real>,
    pub correction: Array3<Real>,
}

impl Level {
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.nx + 2 * self.pad[0],
            self.ny + 2 * self.pad[1],
            self.nz + 2 * self.pad[2],
        )
    }

    /// The interior index range along direction `d` (as a `Range<usize>`
    /// into the halo-inclusive buffers): `pad[d]..pad[d] + n[d]`.
    #[inline]
    pub fn interior_range(&self, d: usize) -> std::ops::Range<usize> {
        let n = [self.nx, self.ny, self.nz][d];
        self.pad[d]..self.pad[d] + n
    }

    pub fn zero_correction(&mut self) {
        self.correction.fill(0.0);
    }

    pub fn zero_phi(&mut self) {
        self.phi.fill(0.0);
    }
}
