//! Pure index arithmetic for halo send/receive slabs.
//!
//! Given a level's halo-inclusive shape and pad widths, computes the index
//! ranges of the interior slab to pack and send across a face, and of the
//! halo slab to unpack a received message into. No MPI type touches this
//! module, so it is unit-testable on its own — mirroring the split between
//! `gmg-topology`'s free index functions and its `ProcessGrid` wrapper.

use std::ops::Range;

use gmg_core::Face;

/// The three index ranges (one per array axis) bounding a slab.
pub type Slab = [Range<usize>; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceDescriptor {
    pub face: Face,
    /// Interior slab packed and sent to the neighbour across `face`.
    pub send: Slab,
    /// Halo slab a message received across `face` is unpacked into.
    pub recv: Slab,
}

/// Builds the [`FaceDescriptor`] for `face` of an array shaped `extents`
/// (the full halo-inclusive shape, i.e. `(nx + 2*pad[0], ny + 2*pad[1], nz +
/// 2*pad[2])` — `extents` already counts the padding, it is not the bare
/// local extent).
///
/// `stagger` shifts the send slab's offset by one cell away from the
/// boundary, used when packing the staggered node family rather than the
/// collocated one. It never affects the receive slab: halo cells are
/// always the outermost `pad` indices of the buffer, regardless of which
/// node family is stored there.
pub fn face_descriptor(extents: (usize, usize, usize), pad: [usize; 3], face: Face, stagger: bool) -> FaceDescriptor {
    let n = [extents.0, extents.1, extents.2];
    let d = face.direction().index();
    let p = pad[d];
    let shift = usize::from(stagger);

    let (send_d, recv_d) = if face.is_low() {
        let lo = p + shift;
        (lo..lo + p, 0..p)
    } else {
        let lo = n[d] - 2 * p - shift;
        (lo..lo + p, n[d] - p..n[d])
    };

    let mut send: Slab = [0..n[0], 0..n[1], 0..n[2]];
    let mut recv = send.clone();
    send[d] = send_d;
    recv[d] = recv_d;

    FaceDescriptor { face, send, recv }
}

/// Element count of a slab — the message length a halo exchange over this
/// face actually transfers.
pub fn slab_len(slab: &Slab) -> usize {
    slab.iter().map(|r| r.end - r.start).product()
}
