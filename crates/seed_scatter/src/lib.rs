#![forbid(unsafe_code)]
//! seed_scatter: Reproducible, tiling-independent seed point generation driven by a density field.
//!
//! Modules:
//! - rng: minimal-standard Lehmer generator and the spatial hash seeding it per cell
//! - density: density fields (constant, linear gradient, closures, scaling)
//! - quadtree: tiles, cells, the non-recursive adaptive sampler and its recursive twin
//! - seeds: run configuration, tiling, the seed set builder, events
//!
//! For examples, see the `seed_scatter_examples` crate.
pub mod density;
pub mod error;
pub mod quadtree;
pub mod rng;
pub mod seeds;

/// Convenient re-exports for common types. Import with `use seed_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::density::{
        Axis, ConstantDensity, DensityField, FnDensity, LinearGradientDensity, ScaledDensity,
    };
    pub use crate::error::{Error, Result};
    pub use crate::quadtree::{
        Cell, QuadtreeSampler, RecursiveSampler, Tile, TileId, TileStats, LEAF_CAPACITY,
    };
    pub use crate::rng::{seed_for_cell, CellKey, MinStdRng};
    pub use crate::seeds::events::{
        EventSink, FnSink, MultiSink, SeedEvent, SeedEventKind, VecSink,
    };
    pub use crate::seeds::tile::{tile_for_position, tiles_covering};
    pub use crate::seeds::{generate_seeds, RunOffset, SeedConfig, SeedSet, SeedSetBuilder};
}
