//! PNG rendering of seed sets and tracing setup shared by the example binaries.
use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};
use seed_scatter::prelude::SeedSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber honouring `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Image layout and colors for a rendered seed set.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels.
    pub image_size: (u32, u32),
    /// World-space extent mapped onto the image; the origin sits bottom-left.
    pub domain_extent: DVec2,
    pub background: [u8; 3],
    pub point_color: [u8; 3],
    /// Dot radius in pixels; 0 draws single pixels.
    pub radius: u32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: DVec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [245, 245, 245],
            point_color: [30, 30, 30],
            radius: 1,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_point_color(mut self, color: [u8; 3]) -> Self {
        self.point_color = color;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    fn to_pixel(&self, p: DVec2) -> Option<(i64, i64)> {
        let (w, h) = self.image_size;
        let uv = p / self.domain_extent;
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return None;
        }
        let x = (uv.x * (w.saturating_sub(1)) as f64).round() as i64;
        let y = ((1.0 - uv.y) * (h.saturating_sub(1)) as f64).round() as i64;
        Some((x, y))
    }
}

/// Renders `points` as dots and writes a PNG to `path`.
pub fn render_points_to_png(
    points: &[DVec2],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let r = config.radius as i64;

    for &p in points {
        let Some((cx, cy)) = config.to_pixel(p) else {
            continue;
        };
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                    img.put_pixel(x as u32, y as u32, Rgb(config.point_color));
                }
            }
        }
    }

    img.save(path.as_ref())?;
    info!("Wrote {} seeds to {}", points.len(), path.as_ref().display());
    Ok(())
}

/// Renders every seed of `set`.
pub fn render_seed_set_to_png(
    set: &SeedSet,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    render_points_to_png(&set.points, config, path)
}
