//! # gmg-halo: parallel halo exchange
//!
//! Synchronises the X/Y face halos of a level's 3-D array across the
//! process grid. Split into pure index arithmetic
//! ([`descriptor`], testable without MPI) and the actual non-blocking
//! exchange ([`exchange`], which needs a live [`gmg_topology::ProcessGrid`]).

pub mod descriptor;
pub mod exchange;

pub use descriptor::{face_descriptor, slab_len, FaceDescriptor, Slab};
pub use exchange::HaloExchanger;
