use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::DVec2;
use seed_scatter::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Peak seeds per unit area used by the gradient benches.
pub const GRADIENT_PEAKS: [f64; 4] = [10.0, 100.0, 1000.0, 4000.0];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Strip domain with a density ramp along x, the shape of a graded seed field.
pub fn gradient_setup(peak: f64) -> (SeedConfig, LinearGradientDensity) {
    let extent = DVec2::new(8.0, 2.0);
    let config = SeedConfig::new(extent, 2.0).with_run_offset(0x5EED);
    (config, LinearGradientDensity::along_x(extent.x, peak))
}
