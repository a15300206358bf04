use glam::DVec2;
use seed_scatter::prelude::*;
use seed_scatter_examples::{init_tracing, render_seed_set_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // The same domain cut into 4.0 and 2.0 tiles; both runs share the 4.0 reference
    // so each physical cell hashes to the same seed.
    let domain_extent = DVec2::new(8.0, 8.0);
    let density = FnDensity::new(|p: DVec2| {
        let d2 = (p - DVec2::splat(4.0)).length_squared();
        4.0 + 60.0 * (-d2 / 4.0).exp()
    });
    let base = SeedConfig::new(domain_extent, 4.0)
        .with_reference_length(4.0)
        .with_run_offset(7);

    let coarse = generate_seeds(base.clone(), &density)?;
    let fine = generate_seeds(base.with_coarse_length(2.0), &density)?;

    let mut a = coarse.points.clone();
    let mut b = fine.points.clone();
    let by_xy = |l: &DVec2, r: &DVec2| l.x.total_cmp(&r.x).then(l.y.total_cmp(&r.y));
    a.sort_by(by_xy);
    b.sort_by(by_xy);
    println!(
        "4.0 tiles: {} seeds in {} tiles; 2.0 tiles: {} seeds in {} tiles; identical: {}",
        coarse.len(),
        coarse.tiles_sampled,
        fine.len(),
        fine.tiles_sampled,
        a == b
    );

    let rc = RenderConfig::new((800, 800), domain_extent).with_radius(2);
    render_seed_set_to_png(
        &coarse,
        &rc.clone().with_point_color([40, 120, 240]),
        "tiling-coarse.png",
    )?;
    render_seed_set_to_png(&fine, &rc.with_point_color([240, 140, 40]), "tiling-fine.png")?;

    Ok(())
}
