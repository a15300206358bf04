//! Reproducible randomness: the Lehmer generator and the spatial hash that seeds it.
pub mod hash;
pub mod minstd;

pub use hash::{combine, hash_cell, seed_for_cell, CellKey};
pub use minstd::{MinStdRng, MAX_UNIFORM_BOUND, MODULUS};
