//! Run configuration for seed generation.
use glam::DVec2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quadtree::sampler::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
use crate::rng::MODULUS;

/// Source of the run-level random offset folded into every cell seed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunOffset {
    /// Draw once per run from the thread-local entropy-seeded generator.
    #[default]
    Entropy,
    /// Use the given offset; reduced modulo `2^31 - 1`.
    Fixed(u32),
}

impl RunOffset {
    /// Draws a fixed offset from `rng`.
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        RunOffset::Fixed(rng.next_u32() % MODULUS)
    }

    /// Resolves to a concrete offset in `[0, 2^31 - 1)`.
    pub fn resolve(self) -> u32 {
        match self {
            RunOffset::Fixed(offset) => offset % MODULUS,
            RunOffset::Entropy => rand::rng().next_u32() % MODULUS,
        }
    }
}

/// Configuration for generating a seed set.
///
/// Output is independent of the tile size only when `reference_length` is set.
/// Without it every coarse tile hashes as level 0, so cutting the same domain
/// into 2.0 and 4.0 tiles yields different seeds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    /// Size of the domain `[0, x) x [0, y)` in world units.
    pub domain_extent: DVec2,
    /// Edge length of the coarse tiles in world units.
    pub coarse_length: f64,
    /// Run-level offset shared by every cell.
    pub run_offset: RunOffset,
    /// Edge length anchoring subdivision levels across runs.
    ///
    /// When set, `reference_length` must be `coarse_length * 2^k` for an
    /// integer `k`, and runs with different tile sizes but the same reference
    /// produce identical seeds in identical cells. Leave it unset only when
    /// every run uses the same `coarse_length`.
    pub reference_length: Option<f64>,
    /// Maximum subdivision depth below a coarse tile.
    pub max_depth: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            domain_extent: DVec2::ZERO,
            coarse_length: 1.0,
            run_offset: RunOffset::Entropy,
            reference_length: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SeedConfig {
    /// Creates a new [`SeedConfig`] with the specified domain extent and coarse tile length.
    pub fn new(domain_extent: DVec2, coarse_length: f64) -> Self {
        Self {
            domain_extent,
            coarse_length,
            ..Default::default()
        }
    }

    /// Sets the coarse tile edge length.
    pub fn with_coarse_length(mut self, coarse_length: f64) -> Self {
        self.coarse_length = coarse_length;
        self
    }

    /// Fixes the run offset for reproducible output.
    pub fn with_run_offset(mut self, run_offset: u32) -> Self {
        self.run_offset = RunOffset::Fixed(run_offset);
        self
    }

    /// Sets the run offset source.
    pub fn with_run_offset_source(mut self, run_offset: RunOffset) -> Self {
        self.run_offset = run_offset;
        self
    }

    /// Sets the reference length anchoring subdivision levels.
    pub fn with_reference_length(mut self, reference_length: f64) -> Self {
        self.reference_length = Some(reference_length);
        self
    }

    /// Sets the maximum subdivision depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let extent = self.domain_extent;
        if !extent.is_finite() || extent.x <= 0.0 || extent.y <= 0.0 {
            return Err(Error::InvalidConfig(
                "domain_extent must be finite and > 0 in both components".into(),
            ));
        }
        if !self.coarse_length.is_finite() || self.coarse_length <= 0.0 {
            return Err(Error::InvalidConfig(
                "coarse_length must be finite and > 0".into(),
            ));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be <= {MAX_SUPPORTED_DEPTH}"
            )));
        }
        self.level_shift()?;
        Ok(())
    }

    /// Level of a coarse tile in the frame anchored at `reference_length`.
    ///
    /// Returns `k` with `reference_length = coarse_length * 2^k`, or 0 without a reference.
    pub fn level_shift(&self) -> Result<i64> {
        let Some(reference) = self.reference_length else {
            return Ok(0);
        };
        if !reference.is_finite() || reference <= 0.0 {
            return Err(Error::InvalidConfig(
                "reference_length must be finite and > 0".into(),
            ));
        }
        let k = (reference / self.coarse_length).log2().round();
        if !k.is_finite() || k.abs() > 1000.0 || self.coarse_length * k.exp2() != reference {
            return Err(Error::InvalidConfig(format!(
                "coarse_length {} is not a power-of-two multiple of reference_length {}",
                self.coarse_length, reference
            )));
        }
        Ok(k as i64)
    }
}
