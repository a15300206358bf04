//! Recursive, order-dependent twin of the quadtree sampler.
//!
//! Splits and samples cells with the same leaf rule as
//! [`crate::quadtree::sampler::QuadtreeSampler`], but draws from one caller
//! generator threaded through a depth-first recursion. Its output depends on
//! tile order and tiling, so it only serves as a reference for the shape of
//! the distribution (how many seeds land where), never for exact positions.
use glam::DVec2;
use rand::Rng;

use crate::density::DensityField;
use crate::error::{Error, Result};
use crate::quadtree::cell::quadrant_offset;
use crate::quadtree::sampler::{DEFAULT_MAX_DEPTH, LEAF_CAPACITY};
use crate::seeds::tile::tiles_covering;

/// Depth-first recursive sampler drawing from an external [`Rng`].
pub struct RecursiveSampler<'a, D: DensityField + ?Sized> {
    density: &'a D,
    max_depth: u32,
}

impl<'a, D: DensityField + ?Sized> RecursiveSampler<'a, D> {
    pub fn new(density: &'a D) -> Self {
        Self {
            density,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Samples every coarse tile covering `[0, extent)` in order.
    pub fn sample_domain(
        &self,
        domain_extent: DVec2,
        coarse_length: f64,
        rng: &mut dyn Rng,
    ) -> Result<Vec<DVec2>> {
        if !(coarse_length.is_finite() && coarse_length > 0.0) {
            return Err(Error::InvalidConfig("coarse_length must be > 0".into()));
        }
        let mut out = Vec::new();
        for tile in tiles_covering(domain_extent, coarse_length) {
            self.sample_square(tile.origin, tile.edge_length, rng, &mut out)?;
        }
        Ok(out)
    }

    /// Samples the square `[origin, origin + edge)`.
    pub fn sample_square(
        &self,
        origin: DVec2,
        edge: f64,
        rng: &mut dyn Rng,
        out: &mut Vec<DVec2>,
    ) -> Result<()> {
        self.subdivide(origin, edge, 0, rng, out)
    }

    fn subdivide(
        &self,
        origin: DVec2,
        edge: f64,
        depth: u32,
        rng: &mut dyn Rng,
        out: &mut Vec<DVec2>,
    ) -> Result<()> {
        let half = 0.5 * edge;
        let center = origin + half;
        let rho = self.density.density(center);
        if !rho.is_finite() || rho < 0.0 {
            return Err(Error::InvalidDensity {
                x: center.x,
                y: center.y,
                value: rho,
            });
        }
        let target_count = edge * edge * rho;

        if target_count > LEAF_CAPACITY && depth < self.max_depth {
            for quadrant in 0..4 {
                let child = origin + quadrant_offset(quadrant) * half;
                self.subdivide(child, half, depth + 1, rng, out)?;
            }
            return Ok(());
        }

        let target_count = target_count.min(LEAF_CAPACITY);
        let mut quadrants = [0u32, 1, 2, 3];
        fisher_yates_shuffle(&mut quadrants, rng);
        let whole = target_count.floor() as usize;
        let remainder = target_count - whole as f64;
        for &quadrant in &quadrants[..whole] {
            out.push(jitter_in_quadrant(rng, origin, half, quadrant));
        }
        if rand01(rng) < remainder && whole < quadrants.len() {
            out.push(jitter_in_quadrant(rng, origin, half, quadrants[whole]));
        }
        Ok(())
    }
}

fn jitter_in_quadrant(rng: &mut dyn Rng, origin: DVec2, half: f64, quadrant: u32) -> DVec2 {
    let u = rand01(rng);
    let v = rand01(rng);
    origin + DVec2::new(u, v) * half + quadrant_offset(quadrant) * half
}

#[inline]
fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0)
}

/// In-place Fisher–Yates shuffle using the provided RNG.
fn fisher_yates_shuffle<T>(arr: &mut [T], rng: &mut dyn Rng) {
    let mut n = arr.len();
    while n > 1 {
        let k = (rng.next_u32() as usize) % n;
        n -= 1;
        arr.swap(n, k);
    }
}
