//! Halo slab arithmetic swept across faces and pad widths. Pure index
//! math — no MPI runtime needed.

use gmg_core::Face;
use gmg_halo::{face_descriptor, slab_len};

#[test]
fn recv_slabs_never_overlap_the_interior() {
    let extents = (12, 10, 8);
    let pad = [1, 1, 1];
    for face in Face::ALL {
        let d = face_descriptor(extents, pad, face, false);
        let axis = face.direction().index();
        let n = [extents.0, extents.1, extents.2][axis] - 2 * pad[axis];
        let interior = pad[axis]..pad[axis] + n;
        assert!(d.recv[axis].start < interior.start || d.recv[axis].start >= interior.end);
    }
}

#[test]
fn message_length_matches_the_non_face_cross_section() {
    let extents = (12, 10, 8);
    let pad = [1, 1, 1];
    for face in Face::ALL {
        let d = face_descriptor(extents, pad, face, false);
        let axis = face.direction().index();
        let cross_section: usize = (0..3)
            .filter(|&i| i != axis)
            .map(|i| [extents.0, extents.1, extents.2][i])
            .product();
        assert_eq!(slab_len(&d.send), cross_section * pad[axis]);
    }
}

#[test]
fn wider_halo_pads_scale_the_slab_linearly() {
    let extents = (20, 20, 20);
    for p in [1usize, 2, 3] {
        let pad = [p, p, p];
        let d = face_descriptor(extents, pad, Face::XMinus, false);
        assert_eq!(slab_len(&d.send), 20 * 20 * p);
    }
}
