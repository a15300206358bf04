//! Seed set generation across the coarse tiles of a domain.
//!
//! [`builder::SeedSetBuilder`] resolves the run offset once, walks the tiles
//! from [`tile::tiles_covering`] in order, and concatenates what the quadtree
//! sampler emits for each of them.
pub mod builder;
pub mod config;
pub mod events;
pub mod tile;

pub use builder::{generate_seeds, SeedSet, SeedSetBuilder};
pub use config::{RunOffset, SeedConfig};
