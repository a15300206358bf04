//! Density fields consumed by the sampler.
//!
//! A density field maps a world-space position to an areal density, the expected
//! number of seeds per unit area around that position. The sampler queries it once
//! per candidate cell, at the cell center.
//! - Define custom fields by implementing [`DensityField`] or wrapping a closure in [`FnDensity`].
//! - Use [`ConstantDensity`] and [`LinearGradientDensity`] for common cases.
//! - Rescale any field with [`ScaledDensity`].
use std::sync::Arc;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trait for areal density fields sampled at a position in world coordinates.
///
/// Implementations must be pure: the same position always yields the same value
/// within one run, and values are finite and `>= 0`.
pub trait DensityField: Send + Sync {
    fn density(&self, p: DVec2) -> f64;
}

impl<T: DensityField + ?Sized> DensityField for &T {
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        (**self).density(p)
    }
}

impl<T: DensityField + ?Sized> DensityField for Box<T> {
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        (**self).density(p)
    }
}

impl<T: DensityField + ?Sized> DensityField for Arc<T> {
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        (**self).density(p)
    }
}

/// Same density everywhere.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDensity(pub f64);

impl DensityField for ConstantDensity {
    #[inline]
    fn density(&self, _p: DVec2) -> f64 {
        self.0
    }
}

/// Coordinate axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn component(self, p: DVec2) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Density grading linearly along one axis: `peak * coord / length`.
///
/// Zero at the domain origin, `peak` at `length` along `axis`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradientDensity {
    pub axis: Axis,
    /// Distance along `axis` at which the density reaches `peak`.
    pub length: f64,
    /// Density at `length`.
    pub peak: f64,
}

impl LinearGradientDensity {
    pub fn new(axis: Axis, length: f64, peak: f64) -> Self {
        Self { axis, length, peak }
    }

    /// Gradient along X over a domain of width `length`.
    pub fn along_x(length: f64, peak: f64) -> Self {
        Self::new(Axis::X, length, peak)
    }
}

impl DensityField for LinearGradientDensity {
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        (self.axis.component(p) / self.length) * self.peak
    }
}

/// Multiplies another field by a constant factor.
#[derive(Clone, Debug)]
pub struct ScaledDensity<D> {
    pub inner: D,
    pub scale: f64,
}

impl<D: DensityField> ScaledDensity<D> {
    pub fn new(inner: D, scale: f64) -> Self {
        Self { inner, scale }
    }
}

impl<D: DensityField> DensityField for ScaledDensity<D> {
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        self.inner.density(p) * self.scale
    }
}

/// A density field backed by a closure.
pub struct FnDensity<F>
where
    F: Fn(DVec2) -> f64 + Send + Sync,
{
    f: F,
}

impl<F> FnDensity<F>
where
    F: Fn(DVec2) -> f64 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> DensityField for FnDensity<F>
where
    F: Fn(DVec2) -> f64 + Send + Sync,
{
    #[inline]
    fn density(&self, p: DVec2) -> f64 {
        (self.f)(p)
    }
}
