//! Adaptive quadtree sampling of a single coarse tile.
//!
//! This module groups the cell/tile geometry, the non-recursive hash-seeded
//! sampler, and its recursive reference twin.
pub mod cell;
pub mod recursive;
pub mod sampler;

pub use cell::{quadrant_offset, Cell, Tile, TileId};
pub use recursive::RecursiveSampler;
pub use sampler::{
    QuadtreeSampler, TileStats, DEFAULT_MAX_DEPTH, LEAF_CAPACITY, MAX_SUPPORTED_DEPTH,
};
