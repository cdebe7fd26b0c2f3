//! Example demonstrating KNN and radius neighbor search
//!
//! This example shows how neighbor groups look for both strategies and both
//! spatial index backends, and how the groups feed the orientation estimator.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surforient_algorithms::{estimate_orientation, search_neighbors, search_neighbors_with, SearchBackend};
use surforient_core::{NeighborGroup, Point3d, SearchCriterion, SearchStrategy};

fn describe(group: &NeighborGroup) -> String {
    group
        .iter()
        .map(|n| format!("{}@{:.2}", n.index, n.distance))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    env_logger::init();
    println!("=== Neighbor Search Example ===\n");

    // A gently dipping surface sampled on a grid, plus a few scattered picks
    let mut points = Vec::new();
    for x in 0..5 {
        for y in 0..5 {
            points.push(Point3d::new(x as f64, y as f64, 0.2 * x as f64));
        }
    }
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..5 {
        let x = rng.gen_range(0.0..4.0);
        let y = rng.gen_range(0.0..4.0);
        points.push(Point3d::new(x, y, 0.2 * x));
    }
    println!("Surface has {} points\n", points.len());

    // 1. KNN: every group has the same size, the point itself comes first
    println!("1. KNN search (4 points per group, anchor included):");
    let knn = search_neighbors(&points, SearchCriterion::Count(4), SearchStrategy::Knn)?;
    for group in knn.iter().take(5) {
        println!("   {}", describe(group));
    }
    println!();

    // 2. Radius: group sizes vary
    println!("2. Radius search (r = 1.1):");
    let radius = search_neighbors(&points, SearchCriterion::Radius(1.1), SearchStrategy::Radius)?;
    for group in radius.iter().take(5) {
        println!("   {} points: {}", group.len(), describe(group));
    }
    println!();

    // 3. Both backends return the same groups
    println!("3. Backend comparison:");
    let brute = search_neighbors_with(
        &points,
        SearchCriterion::Count(4),
        SearchStrategy::Knn,
        SearchBackend::BruteForce,
    )?;
    println!("   R*-tree and brute force agree: {}\n", brute == knn);

    // 4. Orientations from the KNN groups
    println!("4. Normals of the first groups:");
    for group in knn.iter().take(3) {
        let estimate = estimate_orientation(group);
        println!(
            "   point {}: normal ({:.3}, {:.3}, {:.3})",
            group.anchor().index,
            estimate.normal.x,
            estimate.normal.y,
            estimate.normal.z
        );
    }
    println!();

    // 5. Invalid requests are rejected
    println!("5. Invalid criteria:");
    for (criterion, strategy) in [
        (SearchCriterion::Count(0), SearchStrategy::Knn),
        (SearchCriterion::Radius(1.0), SearchStrategy::Knn),
        (SearchCriterion::Radius(-2.0), SearchStrategy::Radius),
    ] {
        if let Err(e) = search_neighbors(&points, criterion, strategy) {
            println!("   {:?} with {}: {}", criterion, strategy, e);
        }
    }
    if let Err(e) = "octree".parse::<SearchStrategy>() {
        println!("   {}", e);
    }

    Ok(())
}
