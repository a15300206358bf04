//! High-level builder running the quadtree sampler over every coarse tile of a domain.
use glam::DVec2;
use mint::Vector2;
use tracing::{debug, info};

use crate::density::DensityField;
use crate::error::Result;
use crate::quadtree::cell::Tile;
use crate::quadtree::sampler::{QuadtreeSampler, TileStats};
use crate::seeds::config::SeedConfig;
use crate::seeds::events::{EventSink, SeedEvent, SeedEventKind};
use crate::seeds::tile::{tile_grid_dims, tiles_covering};

/// Result of a seed generation run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSet {
    /// Seeds in production order: tile by tile, leaf by leaf.
    pub points: Vec<DVec2>,
    /// Run offset every cell seed was derived with.
    pub run_offset: u32,
    /// Coarse tiles sampled.
    pub tiles_sampled: usize,
    /// Aggregated traversal counters.
    pub stats: TileStats,
}

impl SeedSet {
    /// Creates a new empty [`SeedSet`] for `run_offset`.
    pub fn new(run_offset: u32) -> Self {
        Self {
            points: Vec::new(),
            run_offset,
            tiles_sampled: 0,
            stats: TileStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }

    pub fn into_points(self) -> Vec<DVec2> {
        self.points
    }

    /// Points as `mint` vectors for consumers outside the `glam` ecosystem.
    pub fn to_mint_points(&self) -> Vec<Vector2<f64>> {
        self.points.iter().copied().map(Into::into).collect()
    }

    fn push_tile(&mut self, points: &[DVec2], stats: &TileStats) {
        self.points.extend_from_slice(points);
        self.tiles_sampled += 1;
        self.stats.absorb(stats);
    }
}

/// Drives the [`QuadtreeSampler`] across the coarse tiles of a domain.
pub struct SeedSetBuilder<'a, D: DensityField + ?Sized> {
    /// Run configuration applied to this builder.
    config: SeedConfig,
    /// Density field consulted at every candidate cell.
    density: &'a D,
    level_shift: i64,
}

impl<'a, D: DensityField + ?Sized> SeedSetBuilder<'a, D> {
    /// Validates `config` and creates a builder.
    pub fn try_new(config: SeedConfig, density: &'a D) -> Result<Self> {
        config.validate()?;
        let level_shift = config.level_shift()?;
        Ok(Self {
            config,
            density,
            level_shift,
        })
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Tiles in processing order.
    pub fn tiles(&self) -> Vec<Tile> {
        tiles_covering(self.config.domain_extent, self.config.coarse_length).collect()
    }

    /// Sampler for one run with a resolved offset.
    pub fn sampler(&self, run_offset: u32) -> QuadtreeSampler<'a, D> {
        QuadtreeSampler::new(self.density, run_offset)
            .with_level_shift(self.level_shift)
            .with_max_depth(self.config.max_depth)
    }

    /// Generates the seed set.
    pub fn build(&self) -> Result<SeedSet> {
        self.build_with_events(&mut ())
    }

    /// Generates the seed set, reporting progress to `sink`.
    ///
    /// Any error aborts the run; no partial seed set is returned.
    pub fn build_with_events(&self, sink: &mut dyn EventSink) -> Result<SeedSet> {
        let run_offset = self.config.run_offset.resolve();
        let tiles = self.tiles();
        self.log_start(tiles.len(), run_offset);
        if sink.wants(SeedEventKind::RunStarted) {
            sink.send(SeedEvent::RunStarted {
                config: self.config.clone(),
                tile_count: tiles.len(),
                run_offset,
            });
        }

        let sampler = self.sampler(run_offset);
        let mut result = SeedSet::new(run_offset);
        let mut buffer = Vec::new();
        for (index, tile) in tiles.iter().enumerate() {
            if sink.wants(SeedEventKind::TileStarted) {
                sink.send(SeedEvent::TileStarted { index, tile: *tile });
            }

            buffer.clear();
            let stats = sampler.sample_tile_with_events(tile, index, &mut buffer, sink)?;
            debug!(
                "Tile {} ({}, {}): {} seeds in {} leaves, depth {}.",
                index, tile.id.0, tile.id.1, stats.points, stats.leaves, stats.max_depth
            );
            result.push_tile(&buffer, &stats);

            if sink.wants(SeedEventKind::TileFinished) {
                sink.send(SeedEvent::TileFinished {
                    index,
                    tile: *tile,
                    points: stats.points,
                    leaves: stats.leaves,
                });
            }
        }

        self.log_finish(&result);
        if sink.wants(SeedEventKind::RunFinished) {
            sink.send(SeedEvent::RunFinished {
                result: result.clone(),
            });
        }
        Ok(result)
    }

    /// Generates the seed set with tiles sampled in parallel.
    ///
    /// Tile buffers are concatenated in tile order, so the output equals [`Self::build`]
    /// for the same resolved offset.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(&self) -> Result<SeedSet> {
        use rayon::prelude::*;

        let run_offset = self.config.run_offset.resolve();
        let tiles = self.tiles();
        self.log_start(tiles.len(), run_offset);

        let sampler = self.sampler(run_offset);
        let per_tile: Vec<(Vec<DVec2>, TileStats)> = tiles
            .par_iter()
            .map(|tile| {
                let mut points = Vec::new();
                let stats = sampler.sample_tile(tile, &mut points)?;
                Ok((points, stats))
            })
            .collect::<Result<_>>()?;

        let mut result = SeedSet::new(run_offset);
        for (points, stats) in &per_tile {
            result.push_tile(points, stats);
        }
        self.log_finish(&result);
        Ok(result)
    }

    fn log_start(&self, tile_count: usize, run_offset: u32) {
        let (cols, rows) = tile_grid_dims(self.config.domain_extent, self.config.coarse_length);
        info!(
            "Seeding {}x{} domain: {} tiles ({}x{}) of edge {}, run offset {}.",
            self.config.domain_extent.x,
            self.config.domain_extent.y,
            tile_count,
            cols,
            rows,
            self.config.coarse_length,
            run_offset
        );
    }

    fn log_finish(&self, result: &SeedSet) {
        info!(
            "Generated {} seeds from {} leaves ({} splits, max depth {}).",
            result.len(),
            result.stats.leaves,
            result.stats.nodes,
            result.stats.max_depth
        );
    }
}

/// Generates seeds for `config` and `density` in one call.
pub fn generate_seeds<D: DensityField + ?Sized>(config: SeedConfig, density: &D) -> Result<SeedSet> {
    SeedSetBuilder::try_new(config, density)?.build()
}
