//! Non-recursive adaptive sampler for one coarse tile.
//!
//! The sampler walks the implicit quadtree of a [`Tile`] with a single
//! [`Cell`] cursor. Each visited cell is either split (its target count is
//! above [`LEAF_CAPACITY`]) or sampled as a leaf. Leaves draw their points
//! from a [`MinStdRng`] seeded by the absolute cell identity, so a leaf yields
//! the same points no matter which tile or traversal reached it.
use glam::DVec2;
use tracing::warn;

use crate::density::DensityField;
use crate::error::{Error, Result};
use crate::quadtree::cell::{quadrant_offset, Cell, Tile};
use crate::rng::{seed_for_cell, MinStdRng};
use crate::seeds::events::{EventSink, SeedEvent, SeedEventKind};

/// Largest target count a leaf may hold; cells above it are split.
pub const LEAF_CAPACITY: f64 = 4.0;

/// Default limit on subdivision depth below a tile.
pub const DEFAULT_MAX_DEPTH: u32 = 24;

/// Hard limit on subdivision depth below a tile.
///
/// Absolute cell coordinates of far tiles may exceed `i64` at this depth; they
/// wrap, see [`Cell::key`].
pub const MAX_SUPPORTED_DEPTH: u32 = 48;

/// Counters collected while sampling a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileStats {
    /// Seeds emitted.
    pub points: usize,
    /// Leaf cells sampled.
    pub leaves: usize,
    /// Cells split into four children.
    pub nodes: usize,
    /// Deepest level reached.
    pub max_depth: u32,
    /// Leaves at the depth limit whose target count was clamped to [`LEAF_CAPACITY`].
    pub clamped_leaves: usize,
}

impl TileStats {
    /// Adds another tile's counters to these.
    pub fn absorb(&mut self, other: &TileStats) {
        self.points += other.points;
        self.leaves += other.leaves;
        self.nodes += other.nodes;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.clamped_leaves += other.clamped_leaves;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Evaluate,
    Leaf { target_count: f64 },
    AdvanceCursor,
    Done,
}

/// Adaptive quadtree sampler driven by a density field.
pub struct QuadtreeSampler<'a, D: DensityField + ?Sized> {
    density: &'a D,
    run_offset: u32,
    level_shift: i64,
    max_depth: u32,
}

impl<'a, D: DensityField + ?Sized> QuadtreeSampler<'a, D> {
    pub fn new(density: &'a D, run_offset: u32) -> Self {
        Self {
            density,
            run_offset,
            level_shift: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the level shift added to every cell depth before hashing.
    pub fn with_level_shift(mut self, level_shift: i64) -> Self {
        self.level_shift = level_shift;
        self
    }

    /// Sets the depth limit, capped at [`MAX_SUPPORTED_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.min(MAX_SUPPORTED_DEPTH);
        self
    }

    pub fn run_offset(&self) -> u32 {
        self.run_offset
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Expected number of seeds in `cell`: its area times the density at its center.
    pub fn target_count(&self, tile: &Tile, cell: Cell) -> Result<f64> {
        let size = cell.edge_length(tile.edge_length);
        let center = cell.center(tile);
        let rho = self.density.density(center);
        if !rho.is_finite() || rho < 0.0 {
            return Err(Error::InvalidDensity {
                x: center.x,
                y: center.y,
                value: rho,
            });
        }
        Ok(size * size * rho)
    }

    /// Samples every leaf of `tile`, appending seeds to `out` in traversal order.
    ///
    /// On error `out` may hold part of this tile's seeds; callers discard it.
    pub fn sample_tile(&self, tile: &Tile, out: &mut Vec<DVec2>) -> Result<TileStats> {
        self.sample_tile_with_events(tile, 0, out, &mut ())
    }

    pub fn sample_tile_with_events(
        &self,
        tile: &Tile,
        tile_index: usize,
        out: &mut Vec<DVec2>,
        sink: &mut dyn EventSink,
    ) -> Result<TileStats> {
        let mut stats = TileStats::default();
        let mut cursor = Cell::ROOT;
        let mut step = Step::Evaluate;

        loop {
            step = match step {
                Step::Evaluate => {
                    let target_count = self.target_count(tile, cursor)?;
                    if target_count <= LEAF_CAPACITY {
                        Step::Leaf { target_count }
                    } else if cursor.depth >= self.max_depth {
                        stats.clamped_leaves += 1;
                        Step::Leaf {
                            target_count: LEAF_CAPACITY,
                        }
                    } else {
                        stats.nodes += 1;
                        cursor = cursor.first_child();
                        Step::Evaluate
                    }
                }
                Step::Leaf { target_count } => {
                    let emitted = self.sample_leaf(tile, cursor, target_count, out);
                    stats.points += emitted;
                    stats.leaves += 1;
                    stats.max_depth = stats.max_depth.max(cursor.depth);
                    if sink.wants(SeedEventKind::LeafSampled) {
                        sink.send(SeedEvent::LeafSampled {
                            tile_index,
                            cell: cursor,
                            target_count,
                            emitted,
                            center: cursor.center(tile),
                        });
                    }
                    Step::AdvanceCursor
                }
                Step::AdvanceCursor => match cursor.next_in_tile() {
                    Some(next) => {
                        cursor = next;
                        Step::Evaluate
                    }
                    None => Step::Done,
                },
                Step::Done => break,
            };
        }

        if stats.clamped_leaves > 0 {
            warn!(
                "Tile ({}, {}) hit the depth limit {} in {} cells; their target counts were clamped to {}.",
                tile.id.0, tile.id.1, self.max_depth, stats.clamped_leaves, LEAF_CAPACITY
            );
            if sink.wants(SeedEventKind::Warning) {
                sink.send(SeedEvent::Warning {
                    context: format!("tile:{},{}", tile.id.0, tile.id.1),
                    message: format!(
                        "Depth limit {} reached in {} cells; target counts clamped",
                        self.max_depth, stats.clamped_leaves
                    ),
                });
            }
        }

        Ok(stats)
    }

    /// Samples the leaf `cell` with continuous target count `target_count` in `[0, 4]`.
    ///
    /// `floor(target_count)` points land in distinct quadrants picked by a random
    /// permutation; one more lands in the next permuted quadrant with probability
    /// equal to the fractional part. Returns the number of points appended.
    pub fn sample_leaf(
        &self,
        tile: &Tile,
        cell: Cell,
        target_count: f64,
        out: &mut Vec<DVec2>,
    ) -> usize {
        debug_assert!((0.0..=LEAF_CAPACITY).contains(&target_count));
        let half = 0.5 * cell.edge_length(tile.edge_length);
        let origin = cell.origin(tile);
        let seed = seed_for_cell(cell.key(tile.id, self.level_shift), self.run_offset);
        let mut rng = MinStdRng::new(seed);

        let mut quadrants = [0u32; 4];
        rng.permute_into(&mut quadrants);

        let whole = (target_count.floor() as usize).min(quadrants.len());
        let remainder = target_count - whole as f64;
        for &quadrant in &quadrants[..whole] {
            out.push(sample_in_quadrant(&mut rng, origin, half, quadrant));
        }

        // Drawn even for a full leaf so the stream layout does not depend on `whole`.
        let extra = rng.canonical() < remainder && whole < quadrants.len();
        if extra {
            out.push(sample_in_quadrant(&mut rng, origin, half, quadrants[whole]));
        }
        whole + usize::from(extra)
    }
}

#[inline]
fn sample_in_quadrant(rng: &mut MinStdRng, origin: DVec2, half: f64, quadrant: u32) -> DVec2 {
    let u = rng.canonical();
    let v = rng.canonical();
    origin + DVec2::new(u, v) * half + quadrant_offset(quadrant) * half
}
