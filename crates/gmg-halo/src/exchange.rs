//! Non-blocking MPI halo synchronisation.
//!
//! [`HaloExchanger`] builds the four faces' descriptors once (per level,
//! per node family) and its [`HaloExchanger::sync`] method is a free
//! function taking a non-owning `&mut Array3`: it packs, exchanges, and
//! unpacks, with no ownership cycle back to the array — the array never
//! holds a reference to this object.

use mpi::point_to_point::{Destination, Source};
use mpi::request::scope;
use mpi::topology::Process;
use mpi::traits::*;
use ndarray::Array3;

use gmg_core::{Face, MgResult, Real};
use gmg_topology::ProcessGrid;

use crate::descriptor::{face_descriptor, slab_len, FaceDescriptor};

struct FaceLink {
    face: Face,
    descriptor: FaceDescriptor,
    neighbor: i32,
}

/// Holds the fixed per-face descriptors and neighbour ranks for one level's
/// array shape. Stateless across calls to `sync` beyond that: every call
/// re-packs and re-sends the current field values.
pub struct HaloExchanger {
    faces: Vec<FaceLink>,
}

impl HaloExchanger {
    /// Builds the exchanger for an array of `extents` (the full
    /// halo-inclusive shape) with per-direction pad `pad`. `stagger`
    /// selects the staggered node family's slab offset; pass `false` for
    /// the collocated family.
    pub fn new(grid: &ProcessGrid, extents: (usize, usize, usize), pad: [usize; 3], stagger: bool) -> Self {
        let faces = Face::ALL
            .iter()
            .filter_map(|&face| {
                grid.neighbor(face).map(|neighbor| FaceLink {
                    face,
                    descriptor: face_descriptor(extents, pad, face, stagger),
                    neighbor,
                })
            })
            .collect();
        Self { faces }
    }

    /// Synchronises every present face's halo against the neighbour's
    /// current interior. Z is never touched (it has no [`Face`]); a face
    /// with no neighbour (a physical boundary) was never recorded by
    /// [`HaloExchanger::new`] and is silently skipped.
    pub fn sync(&self, array: &mut Array3<Real>, grid: &ProcessGrid) -> MgResult<()> {
        if self.faces.is_empty() {
            return Ok(());
        }
        tracing::trace!(faces = self.faces.len(), "syncing halo faces");

        let world = grid.world();

        let send_buffers: Vec<Vec<Real>> = self
            .faces
            .iter()
            .map(|link| pack(array, &link.descriptor.send))
            .collect();
        let mut recv_buffers: Vec<Vec<Real>> = self
            .faces
            .iter()
            .map(|link| vec![0.0 as Real; slab_len(&link.descriptor.recv)])
            .collect();

        // rsmpi runs with MPI_ERRORS_ARE_FATAL by default: a library error
        // aborts the process rather than surfacing here as a `CommError` —
        // there is no recovery path, the solver aborts.
        scope(|request_scope| {
            // 1. Post non-blocking receives on every present face.
            let mut recv_requests = Vec::with_capacity(self.faces.len());
            for (link, buffer) in self.faces.iter().zip(recv_buffers.iter_mut()) {
                let process: Process = world.process_at_rank(link.neighbor);
                let tag = link.face.opposite() as i32;
                recv_requests.push(process.immediate_receive_into_with_tag(request_scope, buffer, tag));
            }

            // 2. Post non-blocking sends matching each receive.
            let mut send_requests = Vec::with_capacity(self.faces.len());
            for (link, buffer) in self.faces.iter().zip(send_buffers.iter()) {
                let process: Process = world.process_at_rank(link.neighbor);
                let tag = link.face as i32;
                send_requests.push(process.immediate_send_with_tag(request_scope, buffer, tag));
            }

            // 3. Wait for all receives, then all sends.
            for request in recv_requests {
                request.wait();
            }
            for request in send_requests {
                request.wait();
            }
        });

        for (link, buffer) in self.faces.iter().zip(recv_buffers.iter()) {
            unpack(array, &link.descriptor.recv, buffer);
        }

        Ok(())
    }
}

fn pack(array: &Array3<Real>, slab: &crate::descriptor::Slab) -> Vec<Real> {
    array
        .slice(ndarray::s![slab[0].clone(), slab[1].clone(), slab[2].clone()])
        .iter()
        .copied()
        .collect()
}

fn unpack(array: &mut Array3<Real>, slab: &crate::descriptor::Slab, values: &[Real]) {
    let mut view = array.slice_mut(ndarray::s![slab[0].clone(), slab[1].clone(), slab[2].clone()]);
    for (dst, &src) in view.iter_mut().zip(values.iter()) {
        *dst = src;
    }
}
