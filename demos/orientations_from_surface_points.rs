//! Orientations from surface points
//!
//! Builds a small layered model (two folded horizons cut by a dipping fault),
//! estimates one orientation per surface point and prints them as
//! position / pole vector / dip / azimuth rows.
//!
//! ```text
//! cargo run --bin orientations_from_surface_points -- --strategy knn --neighbors 5
//! cargo run --bin orientations_from_surface_points -- --strategy radius --radius 250
//! cargo run --bin orientations_from_surface_points -- --radius 250
//! RUST_LOG=warn cargo run --bin orientations_from_surface_points -- --neighbors 2
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surforient_algorithms::{orientations_from_surface_points, OrientationConfig, SearchBackend};
use surforient_core::{
    OrientationRecord, Point3d, SearchCriterion, SearchStrategy, SurfacePoint, SurfacePointSet,
};

#[derive(Parser, Debug)]
#[command(about = "Estimate orientations from synthetic surface points")]
struct Args {
    /// Search strategy: knn or radius. Defaults to the one matching the criterion
    #[arg(long)]
    strategy: Option<String>,

    /// Neighbor count for knn, the point itself included
    #[arg(long)]
    neighbors: Option<usize>,

    /// Search radius for radius search
    #[arg(long)]
    radius: Option<f64>,

    /// Use the brute force backend instead of the R*-tree
    #[arg(long)]
    brute_force: bool,

    /// Points sampled per surface
    #[arg(long, default_value_t = 25)]
    points_per_surface: usize,

    /// Seed of the sampling noise
    #[arg(long, default_value_t = 5)]
    seed: u64,
}

fn build_config(args: &Args) -> Result<OrientationConfig> {
    let criterion = match (args.neighbors, args.radius) {
        (Some(k), None) => SearchCriterion::Count(k),
        (None, Some(r)) => SearchCriterion::Radius(r),
        (None, None) => OrientationConfig::default().criterion,
        (Some(_), Some(_)) => bail!("give either --neighbors or --radius, not both"),
    };
    let strategy: SearchStrategy = match &args.strategy {
        Some(name) => name.parse()?,
        None => criterion.natural_strategy(),
    };
    if strategy != criterion.natural_strategy() {
        bail!("use --neighbors with knn and --radius with radius search");
    }

    let backend = if args.brute_force {
        SearchBackend::BruteForce
    } else {
        SearchBackend::RTree
    };

    Ok(OrientationConfig {
        criterion,
        strategy,
        backend,
    })
}

/// Two folded horizons and a fault plane dipping 60 degrees to the east
fn layered_model(n: usize, seed: u64) -> SurfacePointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = SurfacePointSet::new();
    let mut id = 0;

    let horizons = [("rock1", 600.0), ("rock2", 900.0)];
    for (name, depth) in horizons {
        for _ in 0..n {
            let x: f64 = rng.gen_range(0.0..2000.0);
            let y: f64 = rng.gen_range(0.0..2000.0);
            let z = depth + 150.0 * (x / 2000.0 * std::f64::consts::PI).sin() + rng.gen_range(-5.0..5.0);
            set.push(SurfacePoint::new(id, Point3d::new(x, y, z), name));
            id += 1;
        }
    }

    let dip = 60f64.to_radians();
    for _ in 0..n {
        let y: f64 = rng.gen_range(0.0..2000.0);
        let z: f64 = rng.gen_range(0.0..2000.0);
        let x = 1000.0 + (1000.0 - z) / dip.tan() + rng.gen_range(-5.0..5.0);
        set.push(SurfacePoint::new(id, Point3d::new(x, y, z), "fault"));
        id += 1;
    }

    set
}

fn print_record(record: &OrientationRecord) {
    println!(
        "{:>6} {:>9.1} {:>9.1} {:>9.1}   {:>7.3} {:>7.3} {:>7.3}   {:>6.1} {:>6.1}{}",
        record.surface,
        record.position.x,
        record.position.y,
        record.position.z,
        record.normal.x,
        record.normal.y,
        record.normal.z,
        record.dip(),
        record.azimuth(),
        if record.degenerate { "  (default)" } else { "" }
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    let set = layered_model(args.points_per_surface, args.seed);
    info!("built model with {} points on {:?}", set.len(), set.surfaces());

    let mut records: Vec<OrientationRecord> = Vec::with_capacity(set.len());
    let summary = orientations_from_surface_points(&set, &config, &mut records)
        .context("orientation estimation failed")?;

    println!(
        "{:>6} {:>9} {:>9} {:>9}   {:>7} {:>7} {:>7}   {:>6} {:>6}",
        "surf", "X", "Y", "Z", "G_x", "G_y", "G_z", "dip", "azim"
    );
    for record in &records {
        print_record(record);
    }

    println!(
        "\n{} orientations, {} with the default normal",
        summary.records, summary.degenerate
    );
    Ok(())
}
