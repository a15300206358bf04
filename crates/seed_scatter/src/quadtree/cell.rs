//! Coarse tiles and the implicit quadtree cells inside them.
//!
//! A [`Tile`] is the root square of one quadtree. A [`Cell`] is a traversal
//! cursor inside a tile: integer coordinates in the grid of its depth, relative
//! to the tile origin. Cells are never stored; the sampler walks them in place.
use glam::DVec2;

use crate::rng::CellKey;

/// Identifier for a tile in the coarse tile grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(
    /// Tile index along the X axis.
    pub i64,
    /// Tile index along the Y axis.
    pub i64,
);

impl TileId {
    /// Tile containing world position `p` in a grid of edge `edge_length` anchored at the origin.
    pub fn for_position(p: DVec2, edge_length: f64) -> Self {
        debug_assert!(edge_length > 0.0, "edge_length must be > 0");
        let idx = (p / edge_length).floor();
        TileId(idx.x as i64, idx.y as i64)
    }
}

/// A coarse tile: the square `[origin, origin + edge_length)` subdivided by one quadtree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Grid offset of this tile.
    pub id: TileId,
    /// World-space origin (lower-left corner).
    pub origin: DVec2,
    /// Edge length in world units.
    pub edge_length: f64,
}

impl Tile {
    /// Tile `id` of a grid with edge `edge_length` anchored at the world origin.
    pub fn new(id: TileId, edge_length: f64) -> Self {
        debug_assert!(edge_length > 0.0, "edge_length must be > 0");
        Self {
            id,
            origin: DVec2::new(id.0 as f64 * edge_length, id.1 as f64 * edge_length),
            edge_length,
        }
    }
}

/// Cursor position in the implicit quadtree of a tile.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column within the grid of this depth, counted from the tile origin.
    pub i: u64,
    /// Row within the grid of this depth, counted from the tile origin.
    pub j: u64,
    /// Subdivision depth; 0 is the tile itself.
    pub depth: u32,
}

impl Cell {
    /// The tile root.
    pub const ROOT: Cell = Cell {
        i: 0,
        j: 0,
        depth: 0,
    };

    pub fn new(i: u64, j: u64, depth: u32) -> Self {
        Self { i, j, depth }
    }

    /// Edge length of this cell in a tile of edge `tile_edge`.
    #[inline]
    pub fn edge_length(&self, tile_edge: f64) -> f64 {
        tile_edge / (1u64 << self.depth) as f64
    }

    /// World-space origin (lower-left corner).
    #[inline]
    pub fn origin(&self, tile: &Tile) -> DVec2 {
        let size = self.edge_length(tile.edge_length);
        tile.origin + size * DVec2::new(self.i as f64, self.j as f64)
    }

    /// World-space center.
    #[inline]
    pub fn center(&self, tile: &Tile) -> DVec2 {
        self.origin(tile) + 0.5 * self.edge_length(tile.edge_length)
    }

    /// Whether `p` lies in the closed square of this cell.
    pub fn contains(&self, tile: &Tile, p: DVec2) -> bool {
        let min = self.origin(tile);
        let max = min + self.edge_length(tile.edge_length);
        p.cmpge(min).all() && p.cmple(max).all()
    }

    /// Lower-left child, one level down.
    #[inline]
    pub fn first_child(self) -> Cell {
        Cell {
            i: self.i * 2,
            j: self.j * 2,
            depth: self.depth + 1,
        }
    }

    /// Next cell to evaluate after this one has been sampled as a leaf, or `None`
    /// when the whole tile has been visited.
    ///
    /// Siblings are visited `(0,0) -> (1,0) -> (0,1) -> (1,1)`; after the last
    /// sibling the cursor climbs until a level with unvisited siblings remains.
    pub fn next_in_tile(self) -> Option<Cell> {
        let mut cell = self;
        while cell.depth > 0 && cell.i % 2 == 1 && cell.j % 2 == 1 {
            cell.i /= 2;
            cell.j /= 2;
            cell.depth -= 1;
        }
        if cell.depth == 0 {
            return None;
        }
        if cell.i % 2 == 0 {
            cell.i += 1;
        } else {
            cell.i -= 1;
            cell.j += 1;
        }
        Some(cell)
    }

    /// Absolute identity of this cell.
    ///
    /// Coordinates are rebased from the tile onto the grid of this depth
    /// anchored at the world origin; `level_shift` moves the depth into a
    /// frame shared by runs with different tile sizes.
    ///
    /// Coordinates wrap like [`crate::rng::hash_cell`] once the absolute grid
    /// exceeds `i64`, so far-away deep cells alias instead of overflowing.
    pub fn key(&self, tile: TileId, level_shift: i64) -> CellKey {
        let scale = 1i64 << self.depth;
        CellKey::new(
            tile.0.wrapping_mul(scale).wrapping_add(self.i as i64),
            tile.1.wrapping_mul(scale).wrapping_add(self.j as i64),
            (self.depth as i64).wrapping_add(level_shift),
        )
    }
}

/// Sub-offset of quadrant `index` in units of half the cell edge.
///
/// Quadrants are numbered `0: (0,0)`, `1: (1,0)`, `2: (0,1)`, `3: (1,1)`.
#[inline]
pub fn quadrant_offset(index: u32) -> DVec2 {
    debug_assert!(index < 4, "quadrant index must be < 4");
    DVec2::new((index % 2) as f64, (index / 2) as f64)
}
