use glam::DVec2;
use seed_scatter::prelude::*;
use seed_scatter_examples::{init_tracing, render_seed_set_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 8 x 2 mm strip, seed density rising linearly to 2000 per mm^2 at the right edge.
    let domain_extent = DVec2::new(8.0, 2.0);
    let density = LinearGradientDensity::along_x(domain_extent.x, 2000.0);

    let config = SeedConfig::new(domain_extent, 2.0).with_run_offset(2024);
    let set = generate_seeds(config, &density)?;

    println!(
        "{} seeds, {} leaves, {} splits, max depth {}",
        set.len(),
        set.stats.leaves,
        set.stats.nodes,
        set.stats.max_depth
    );

    let rc = RenderConfig::new((2000, 500), domain_extent)
        .with_background([250, 248, 240])
        .with_point_color([30, 60, 140])
        .with_radius(0);
    render_seed_set_to_png(&set, &rc, "graded-seeds.png")?;

    Ok(())
}
