//! Tile utilities for seed generation.
//!
//! Convert between world-space positions and the coarse tile grid covering the
//! domain `[0, extent.x) x [0, extent.y)`.
//!
//! Primary helper: [`tiles_covering`], which yields every [`Tile`] a run visits,
//! in processing order.
use glam::DVec2;

use crate::quadtree::cell::{Tile, TileId};

/// Number of tile columns and rows needed to cover `domain_extent`.
///
/// A trailing partial tile counts as a whole one. Non-positive extents give 0.
pub fn tile_grid_dims(domain_extent: DVec2, coarse_length: f64) -> (usize, usize) {
    debug_assert!(coarse_length > 0.0, "coarse_length must be > 0");
    let dims = (domain_extent / coarse_length).ceil().max(DVec2::ZERO);
    (dims.x as usize, dims.y as usize)
}

/// All tiles covering `domain_extent`, X-major: the inner loop walks Y.
pub fn tiles_covering(domain_extent: DVec2, coarse_length: f64) -> impl Iterator<Item = Tile> {
    let (cols, rows) = tile_grid_dims(domain_extent, coarse_length);
    (0..cols).flat_map(move |ix| {
        (0..rows).map(move |iy| Tile::new(TileId(ix as i64, iy as i64), coarse_length))
    })
}

/// Position of `tile` in the order produced by [`tiles_covering`].
pub fn tile_index(tile: TileId, domain_extent: DVec2, coarse_length: f64) -> Option<usize> {
    let (cols, rows) = tile_grid_dims(domain_extent, coarse_length);
    if tile.0 < 0 || tile.1 < 0 || tile.0 as usize >= cols || tile.1 as usize >= rows {
        return None;
    }
    Some(tile.0 as usize * rows + tile.1 as usize)
}

/// Tile containing world position `p`, if it lies inside the tiled area.
pub fn tile_for_position(p: DVec2, domain_extent: DVec2, coarse_length: f64) -> Option<Tile> {
    let id = TileId::for_position(p, coarse_length);
    tile_index(id, domain_extent, coarse_length).map(|_| Tile::new(id, coarse_length))
}
