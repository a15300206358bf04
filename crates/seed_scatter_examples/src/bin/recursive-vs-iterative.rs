use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_scatter::prelude::*;
use seed_scatter_examples::{
    init_tracing, render_points_to_png, render_seed_set_to_png, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let domain_extent = DVec2::new(4.0, 4.0);
    let density = LinearGradientDensity::along_x(domain_extent.x, 300.0);
    let coarse_length = 1.0;

    // Hash-seeded traversal: reproducible for a fixed run offset.
    let config = SeedConfig::new(domain_extent, coarse_length).with_run_offset(11);
    let iterative = generate_seeds(config, &density)?;

    // Recursive traversal threading one generator through every tile.
    let mut rng = StdRng::seed_from_u64(11);
    let recursive =
        RecursiveSampler::new(&density).sample_domain(domain_extent, coarse_length, &mut rng)?;

    println!(
        "iterative: {} seeds, recursive: {} seeds",
        iterative.len(),
        recursive.len()
    );

    let rc = RenderConfig::new((800, 800), domain_extent).with_radius(1);
    render_seed_set_to_png(
        &iterative,
        &rc.clone().with_point_color([40, 120, 240]),
        "iterative.png",
    )?;
    render_points_to_png(&recursive, &rc.with_point_color([200, 60, 60]), "recursive.png")?;

    Ok(())
}
